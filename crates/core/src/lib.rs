pub mod catalog;
pub mod config;
pub mod episodes;
pub mod error;
pub mod links;
pub mod orchestrator;
pub mod ranking;
pub mod renderer;
pub mod testing;

pub use catalog::{CatalogEntry, CatalogFetcher, DetailExtractor, ExternalLink, TitleDetail};
pub use config::{
    load_config, load_config_from_str, validate_config, BrowserConfig, Config, ConfigError,
    ServerConfig, SourceConfig,
};
pub use episodes::{EpisodePaginator, EpisodeRecord, FeedError, PageReleaseFeed, ReleaseFeed};
pub use error::ResolveError;
pub use links::{LinkBundle, PlaybackLinkResolver, ResolvedEpisode};
pub use orchestrator::ResolutionOrchestrator;
pub use ranking::{rank, RankedEntry};
pub use renderer::{
    ChromiumRenderer, RenderError, RenderPage, RenderSession, Renderer, WaitFor,
};
