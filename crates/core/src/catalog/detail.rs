//! Title detail extraction: structured metadata plus a derived episode
//! count from the paginated listing endpoint.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::episodes::{EpisodePaginator, ReleaseFeed};
use crate::error::ResolveError;
use crate::renderer::{RenderPage, WaitFor};

use super::{ExternalLink, TitleDetail};

/// Readiness marker for the detail page's primary content region.
const DETAIL_READY_SELECTOR: &str = "section.main";

/// Derives the stable catalog id from the canonical self-referencing URL
/// embedded in the document (last path segment of og:url).
const CATALOG_ID_SCRIPT: &str = r#"
(() => {
    const meta = document.querySelector('meta[property="og:url"]');
    return meta ? meta.content.split('/').pop() : null;
})()
"#;

/// Extracts the free-text fields, images, attribute map, genres and
/// external links. Attribute labels are lowercased with trailing colons
/// removed, and the label text is subtracted from its block's value.
const DETAIL_FIELDS_SCRIPT: &str = r#"
(() => {
    const getText = (selector) => {
        const el = document.querySelector(selector);
        return el ? el.textContent.trim() : null;
    };
    const getAttr = (selector, attr) => {
        const el = document.querySelector(selector);
        return el ? el.getAttribute(attr) : null;
    };

    const attributes = {};
    document.querySelectorAll('.anime-info p').forEach(p => {
        const strong = p.querySelector('strong');
        if (!strong) return;
        const key = strong.textContent.replace(':', '').trim().toLowerCase();
        const value = p.textContent.replace(strong.textContent, '').trim();
        attributes[key] = value;
    });

    const genres = Array.from(document.querySelectorAll('.anime-genre li a'))
        .map(a => a.textContent.trim());
    const external_links = Array.from(document.querySelectorAll('.external-links a'))
        .map(a => ({ label: a.textContent.trim(), url: a.href }));

    return {
        title: getText('h1 span'),
        japanese_title: getText('h2.japanese'),
        synopsis: getText('.anime-synopsis'),
        poster: getAttr('.anime-poster img', 'data-src'),
        cover: getAttr('.anime-cover', 'data-src'),
        attributes,
        genres,
        external_links,
    };
})()
"#;

#[derive(Debug, Deserialize)]
struct DetailFields {
    title: Option<String>,
    japanese_title: Option<String>,
    synopsis: Option<String>,
    poster: Option<String>,
    cover: Option<String>,
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    external_links: Vec<ExternalLink>,
}

/// Reject any URL outside the catalog's detail-page prefix. This runs
/// before any collaborator contact so the resolver cannot be used as an
/// open fetch proxy.
pub fn validate_detail_url(url: &str, base_url: &str) -> Result<(), ResolveError> {
    let prefix = format!("{}/anime/", base_url);
    if url.starts_with(&prefix) && url.len() > prefix.len() {
        Ok(())
    } else {
        Err(ResolveError::validation(format!(
            "Invalid or missing detail URL, expected prefix '{}'",
            prefix
        )))
    }
}

/// Loads one title's detail page and composes a [`TitleDetail`].
pub struct DetailExtractor<'a> {
    page: &'a dyn RenderPage,
}

impl<'a> DetailExtractor<'a> {
    pub fn new(page: &'a dyn RenderPage) -> Self {
        Self { page }
    }

    /// Extract metadata for `detail_url`, running the paginator in count
    /// mode for `total_episodes`. Partial metadata is never a success:
    /// navigation, readiness or identity failure fails the operation.
    pub async fn extract(
        &self,
        detail_url: &str,
        feed: &dyn ReleaseFeed,
    ) -> Result<TitleDetail, ResolveError> {
        self.page
            .navigate(
                detail_url,
                WaitFor::Selector(DETAIL_READY_SELECTOR.to_string()),
            )
            .await?;

        let catalog_id = self
            .page
            .evaluate(CATALOG_ID_SCRIPT)
            .await?
            .as_str()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ResolveError::upstream("Failed to derive catalog id from detail page")
            })?;
        debug!("Derived catalog id '{}'", catalog_id);

        let raw = self.page.evaluate(DETAIL_FIELDS_SCRIPT).await?;
        let fields: DetailFields = serde_json::from_value(raw)
            .map_err(|e| ResolveError::upstream(format!("malformed detail payload: {}", e)))?;

        let total_episodes = EpisodePaginator::new(feed).count_all(&catalog_id).await;

        Ok(TitleDetail {
            title: fields.title,
            japanese_title: fields.japanese_title,
            synopsis: fields.synopsis,
            poster: fields.poster,
            cover: fields.cover,
            attributes: fields.attributes,
            genres: fields.genres,
            external_links: fields.external_links,
            catalog_id,
            total_episodes,
        })
    }
}
