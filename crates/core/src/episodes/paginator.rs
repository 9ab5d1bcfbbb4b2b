//! Bounded, sequential pagination over the release listing.

use tracing::debug;

use super::{EpisodeRecord, ReleaseFeed};

/// Hard ceiling on pages fetched per operation. Caps worst-case latency
/// against a misbehaving or infinite-looking upstream.
pub const MAX_PAGES: u32 = 50;

/// Iterates the release listing for one title, page by page and in order.
///
/// Page N+1 is never fetched before page N's outcome is known: search mode
/// must return the first ascending-page match. A transport failure or an
/// empty/absent payload on any page silently ends pagination rather than
/// failing the operation.
pub struct EpisodePaginator<'a> {
    feed: &'a dyn ReleaseFeed,
}

impl<'a> EpisodePaginator<'a> {
    pub fn new(feed: &'a dyn ReleaseFeed) -> Self {
        Self { feed }
    }

    /// Search mode: first record matching `target` across ascending pages
    /// wins; later pages are never scanned once a match is found.
    pub async fn find_episode(&self, catalog_id: &str, target: f64) -> Option<EpisodeRecord> {
        for page in 1..=MAX_PAGES {
            let records = match self.feed.fetch_page(catalog_id, page, true).await {
                Ok(Some(records)) => records,
                Ok(None) => {
                    debug!("Release listing ended at page {}", page);
                    return None;
                }
                Err(e) => {
                    debug!("Release fetch failed at page {}: {}", page, e);
                    return None;
                }
            };
            if records.is_empty() {
                return None;
            }

            if let Some(record) = records.iter().find(|r| r.matches(target)) {
                debug!("Found episode {} on page {}", target, page);
                return Some(EpisodeRecord::from_release(record));
            }
        }
        debug!("Episode {} not found within {} pages", target, MAX_PAGES);
        None
    }

    /// Count mode: sums record counts across all pages until exhaustion or
    /// the ceiling. A mid-run transport failure yields a best-effort
    /// (possibly undercounted) total.
    pub async fn count_all(&self, catalog_id: &str) -> u32 {
        let mut total = 0u32;
        for page in 1..=MAX_PAGES {
            let records = match self.feed.fetch_page(catalog_id, page, false).await {
                Ok(Some(records)) if !records.is_empty() => records,
                Ok(_) => break,
                Err(e) => {
                    debug!("Release fetch failed at page {}: {}", page, e);
                    break;
                }
            };
            total += records.len() as u32;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockReleaseFeed;
    use serde_json::json;

    fn records(episodes: &[i64]) -> serde_json::Value {
        json!(episodes
            .iter()
            .map(|e| json!({"episode": e, "snapshot": "s", "session": format!("tok{}", e)}))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_search_finds_first_ascending_match() {
        let feed = MockReleaseFeed::new();
        feed.push_page(records(&[1, 2]));
        feed.push_page(records(&[2, 3]));

        let found = EpisodePaginator::new(&feed)
            .find_episode("id", 2.0)
            .await
            .unwrap();
        // Page 1's record wins even though page 2 also matches.
        assert_eq!(found.session_token, "tok2");
        assert_eq!(feed.calls(), 1);
    }

    #[tokio::test]
    async fn test_search_stops_at_page_ceiling() {
        let feed = MockReleaseFeed::new();
        feed.set_endless_page(records(&[1]));

        let found = EpisodePaginator::new(&feed).find_episode("id", 99.0).await;
        assert!(found.is_none());
        assert_eq!(feed.calls(), MAX_PAGES as usize);
    }

    #[tokio::test]
    async fn test_search_stops_on_transport_failure() {
        let feed = MockReleaseFeed::new();
        feed.push_page(records(&[1]));
        feed.fail_after(1);

        let found = EpisodePaginator::new(&feed).find_episode("id", 5.0).await;
        assert!(found.is_none());
        assert_eq!(feed.calls(), 2);
    }

    #[tokio::test]
    async fn test_count_all_sums_until_empty_page() {
        let feed = MockReleaseFeed::new();
        feed.push_page(records(&(1..=20).collect::<Vec<_>>()));
        feed.push_page(records(&(21..=40).collect::<Vec<_>>()));
        feed.push_page(records(&(41..=47).collect::<Vec<_>>()));
        feed.push_page(json!([]));

        let total = EpisodePaginator::new(&feed).count_all("id").await;
        assert_eq!(total, 47);
    }

    #[tokio::test]
    async fn test_count_all_hits_ceiling() {
        let feed = MockReleaseFeed::new();
        feed.set_endless_page(records(&[1, 2]));

        let total = EpisodePaginator::new(&feed).count_all("id").await;
        assert_eq!(total, 2 * MAX_PAGES);
        assert_eq!(feed.calls(), MAX_PAGES as usize);
    }

    #[tokio::test]
    async fn test_count_all_best_effort_on_failure() {
        let feed = MockReleaseFeed::new();
        feed.push_page(records(&[1, 2, 3]));
        feed.fail_after(1);

        let total = EpisodePaginator::new(&feed).count_all("id").await;
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_search_uses_ascending_sort_and_count_does_not() {
        let feed = MockReleaseFeed::new();
        feed.push_page(records(&[1]));
        let _ = EpisodePaginator::new(&feed).find_episode("id", 1.0).await;
        assert_eq!(feed.last_sort(), Some(true));

        let feed = MockReleaseFeed::new();
        feed.push_page(records(&[1]));
        feed.push_page(json!([]));
        let _ = EpisodePaginator::new(&feed).count_all("id").await;
        assert_eq!(feed.last_sort(), Some(false));
    }
}
