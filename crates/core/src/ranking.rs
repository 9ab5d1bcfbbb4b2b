//! Similarity ranking of catalog entries against a free-text query.

use serde::Serialize;

use crate::catalog::CatalogEntry;

/// Maximum number of ranked results returned to the caller.
pub const RESULTS_LIMIT: usize = 10;

/// A catalog entry with its similarity score against the query.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub title: String,
    pub link: String,
    /// Sorensen-Dice bigram similarity in [0, 1].
    pub similarity: f64,
}

/// Score `entries` against `query` and return the best matches, sorted
/// descending by similarity, capped at [`RESULTS_LIMIT`].
///
/// Matching is case-insensitive: the site renders stylized casing, so both
/// sides are lowercased before scoring. Ties keep catalog encounter order
/// (the sort is stable). The input is never mutated.
pub fn rank(query: &str, entries: &[CatalogEntry]) -> Vec<RankedEntry> {
    let query = query.to_lowercase();

    let mut ranked: Vec<RankedEntry> = entries
        .iter()
        .map(|entry| RankedEntry {
            title: entry.title.clone(),
            link: entry.link.clone(),
            similarity: strsim::sorensen_dice(&entry.title.to_lowercase(), &query),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(RESULTS_LIMIT);
    ranked
}
