//! Episode listing pagination against the upstream release endpoint.

mod page_feed;
mod paginator;
mod types;

pub use page_feed::PageReleaseFeed;
pub use paginator::{EpisodePaginator, MAX_PAGES};
pub use types::*;
