//! Catalog listing fetch: the full title index, scraped from the site's
//! alphabetical listing page.

use tracing::debug;

use crate::error::ResolveError;
use crate::renderer::{RenderPage, WaitFor};

use super::CatalogEntry;

/// Readiness marker for the listing page's content region.
const LISTING_READY_SELECTOR: &str = ".tab-content .tab-pane";

/// Scrolls the listing to the bottom so lazily rendered panes populate.
const AUTO_SCROLL_SCRIPT: &str = r#"
(async () => {
    await new Promise((resolve) => {
        let totalHeight = 0;
        const distance = 100;
        const timer = setInterval(() => {
            const scrollHeight = document.body.scrollHeight;
            window.scrollBy(0, distance);
            totalHeight += distance;
            if (totalHeight >= scrollHeight) {
                clearInterval(timer);
                resolve();
            }
        }, 100);
    });
    return true;
})()
"#;

/// Collects every (title, link) pair across all listing panes.
const COLLECT_ENTRIES_SCRIPT: &str = r#"
(() => {
    const entries = [];
    const panes = document.querySelectorAll('.tab-content .tab-pane');
    panes.forEach(pane => {
        const items = pane.querySelectorAll('.col-12.col-md-6 a');
        items.forEach(a => {
            const title = a.getAttribute('title');
            const link = a.getAttribute('href');
            if (title && link) entries.push({ title, link });
        });
    });
    return entries;
})()
"#;

/// Loads the catalog listing through the rendering collaborator.
pub struct CatalogFetcher<'a> {
    page: &'a dyn RenderPage,
    base_url: &'a str,
}

impl<'a> CatalogFetcher<'a> {
    pub fn new(page: &'a dyn RenderPage, base_url: &'a str) -> Self {
        Self { page, base_url }
    }

    /// Fetch all raw catalog entries from the listing page.
    pub async fn fetch(&self) -> Result<Vec<CatalogEntry>, ResolveError> {
        let url = format!("{}/anime", self.base_url);
        self.page
            .navigate(&url, WaitFor::Selector(LISTING_READY_SELECTOR.to_string()))
            .await?;

        // The listing renders its panes lazily while scrolling.
        self.page.evaluate(AUTO_SCROLL_SCRIPT).await?;

        let raw = self.page.evaluate(COLLECT_ENTRIES_SCRIPT).await?;
        let entries: Vec<CatalogEntry> = serde_json::from_value(raw)
            .map_err(|e| ResolveError::upstream(format!("malformed catalog listing: {}", e)))?;

        debug!("Fetched {} catalog entries", entries.len());
        Ok(entries)
    }
}
