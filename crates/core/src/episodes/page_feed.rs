//! Release feed backed by an in-page fetch through the rendering
//! collaborator.
//!
//! The site gates its listing API behind cookies issued to the browser, so
//! the fetch runs inside a document already loaded from the catalog host
//! instead of going through a plain HTTP client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::renderer::RenderPage;

use super::{FeedError, ReleaseFeed, ReleaseRecord};

#[derive(Debug, Deserialize)]
struct ReleaseEnvelope {
    #[serde(default)]
    data: Option<Vec<ReleaseRecord>>,
}

pub struct PageReleaseFeed<'a> {
    page: &'a dyn RenderPage,
    base_url: &'a str,
}

impl<'a> PageReleaseFeed<'a> {
    pub fn new(page: &'a dyn RenderPage, base_url: &'a str) -> Self {
        Self { page, base_url }
    }

    fn fetch_script(&self, catalog_id: &str, page: u32, ascending: bool) -> String {
        let sort = if ascending { "&sort=episode_asc" } else { "" };
        let api_url = format!(
            "{}/api?m=release&id={}&page={}{}",
            self.base_url,
            urlencoding::encode(catalog_id),
            page,
            sort
        );
        format!(
            r#"
(async () => {{
    try {{
        const res = await fetch('{api_url}');
        if (!res.ok) return null;
        return await res.json();
    }} catch (e) {{
        return null;
    }}
}})()
"#
        )
    }
}

#[async_trait]
impl ReleaseFeed for PageReleaseFeed<'_> {
    async fn fetch_page(
        &self,
        catalog_id: &str,
        page: u32,
        ascending: bool,
    ) -> Result<Option<Vec<ReleaseRecord>>, FeedError> {
        let script = self.fetch_script(catalog_id, page, ascending);
        let raw = self
            .page
            .evaluate(&script)
            .await
            .map_err(|e| FeedError::Fetch(e.to_string()))?;

        if raw.is_null() {
            return Ok(None);
        }

        let envelope: ReleaseEnvelope = serde_json::from_value(raw)
            .map_err(|e| FeedError::Malformed(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_script_includes_sort_only_when_ascending() {
        let page = crate::testing::MockRenderer::new().scripted_page();
        let feed = PageReleaseFeed::new(&page, "https://animepahe.ru");

        let with_sort = feed.fetch_script("abc", 3, true);
        assert!(with_sort.contains("m=release&id=abc&page=3&sort=episode_asc"));

        let without_sort = feed.fetch_script("abc", 3, false);
        assert!(without_sort.contains("m=release&id=abc&page=3"));
        assert!(!without_sort.contains("sort=episode_asc"));
    }

    #[test]
    fn test_fetch_script_encodes_catalog_id() {
        let page = crate::testing::MockRenderer::new().scripted_page();
        let feed = PageReleaseFeed::new(&page, "https://animepahe.ru");
        let script = feed.fetch_script("a b/c", 1, false);
        assert!(script.contains("id=a%20b%2Fc"));
    }
}
