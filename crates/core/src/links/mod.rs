//! Playback and download link extraction and classification.

mod resolver;
mod types;

pub use resolver::{PlaybackLinkResolver, ResolvedEpisode};
pub use types::*;
