use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One (title, link) pair from the catalog listing. Ephemeral: produced by
/// the fetcher, consumed immediately by the ranker, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub link: String,
}

/// An external reference link on a title's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

/// Structured metadata for one catalog title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleDetail {
    pub title: Option<String>,
    pub japanese_title: Option<String>,
    pub synopsis: Option<String>,
    pub poster: Option<String>,
    pub cover: Option<String>,
    /// Label -> value pairs from the info block, labels lowercased with
    /// trailing colons removed.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_links: Vec<ExternalLink>,
    pub catalog_id: String,
    pub total_episodes: u32,
}
