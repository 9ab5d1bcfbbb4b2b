//! Catalog listing and title detail extraction.

mod detail;
mod fetcher;
mod types;

pub use detail::{validate_detail_url, DetailExtractor};
pub use fetcher::CatalogFetcher;
pub use types::*;
