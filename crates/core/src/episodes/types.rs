use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from the upstream listing resource. The paginator swallows these
/// (a transport hiccup on page N must not fail an answer found on pages
/// 1..N-1), but implementations still report them for logging.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Listing fetch failed: {0}")]
    Fetch(String),

    #[error("Listing payload malformed: {0}")]
    Malformed(String),
}

/// One raw record from the release listing. The upstream labels the
/// episode identifier inconsistently (`episode` in some responses,
/// `number` in others) and emits it as either a number or numeric-like
/// text, so both fields are kept raw and compared numerically.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRecord {
    #[serde(default)]
    pub episode: Option<Value>,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub snapshot: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

impl ReleaseRecord {
    /// Numeric-equality match against the target episode, tried under
    /// both identifier labels.
    pub fn matches(&self, target: f64) -> bool {
        [&self.episode, &self.number]
            .into_iter()
            .flatten()
            .any(|v| numeric_eq(v, target))
    }
}

/// A resolved episode: identity is (catalog id, episode number), and the
/// session token is the opaque identifier needed to build a play URL.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeRecord {
    pub episode_number: Value,
    pub snapshot_url: String,
    pub session_token: String,
}

impl EpisodeRecord {
    pub(crate) fn from_release(record: &ReleaseRecord) -> Self {
        Self {
            episode_number: record
                .episode
                .clone()
                .or_else(|| record.number.clone())
                .unwrap_or(Value::Null),
            snapshot_url: unescape_snapshot(record.snapshot.as_deref().unwrap_or_default()),
            session_token: record.session.clone().unwrap_or_default(),
        }
    }
}

/// The upstream emits snapshot URLs with escaped forward slashes.
pub fn unescape_snapshot(raw: &str) -> String {
    raw.replace("\\/", "/")
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn numeric_eq(value: &Value, target: f64) -> bool {
    as_number(value).map_or(false, |n| (n - target).abs() < f64::EPSILON)
}

/// The upstream listing resource: a paged JSON endpoint keyed by
/// (catalog id, 1-indexed page, optional ascending sort).
///
/// `Ok(None)` means the endpoint answered with a non-success status or an
/// absent payload; both end pagination without being an error.
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    async fn fetch_page(
        &self,
        catalog_id: &str,
        page: u32,
        ascending: bool,
    ) -> Result<Option<Vec<ReleaseRecord>>, FeedError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_unescape() {
        assert_eq!(unescape_snapshot("a\\/b\\/c"), "a/b/c");
        assert_eq!(unescape_snapshot("https://cdn/img.jpg"), "https://cdn/img.jpg");
    }

    #[test]
    fn test_matches_under_either_label() {
        let by_episode: ReleaseRecord = serde_json::from_value(json!({"episode": 7})).unwrap();
        let by_number: ReleaseRecord = serde_json::from_value(json!({"number": 7})).unwrap();
        assert!(by_episode.matches(7.0));
        assert!(by_number.matches(7.0));
        assert!(!by_episode.matches(8.0));
    }

    #[test]
    fn test_numeric_equality_coerces_strings() {
        let record: ReleaseRecord = serde_json::from_value(json!({"episode": "12"})).unwrap();
        assert!(record.matches(12.0));

        let record: ReleaseRecord = serde_json::from_value(json!({"episode": "abc"})).unwrap();
        assert!(!record.matches(12.0));
    }

    #[test]
    fn test_from_release_unescapes_snapshot() {
        let record: ReleaseRecord = serde_json::from_value(json!({
            "episode": 3,
            "snapshot": "https:\\/\\/cdn.example\\/snap.jpg",
            "session": "tok123",
        }))
        .unwrap();
        let episode = EpisodeRecord::from_release(&record);
        assert_eq!(episode.snapshot_url, "https://cdn.example/snap.jpg");
        assert_eq!(episode.session_token, "tok123");
        assert_eq!(episode.episode_number, json!(3));
    }
}
