//! Testing utilities and mock implementations.
//!
//! Mock versions of the external collaborators (rendering engine, release
//! feed), allowing the full resolution stack to run without a browser or
//! network.
//!
//! # Example
//!
//! ```rust,ignore
//! use pahescope_core::testing::MockRenderer;
//!
//! let renderer = MockRenderer::new();
//! renderer.on_script("og:url", serde_json::json!("https://site/anime/abc123"));
//! renderer.set_title("Some Anime :: animepahe");
//!
//! // Use in a ResolutionOrchestrator...
//! assert_eq!(renderer.sessions_opened(), 1);
//! ```

mod mock_feed;
mod mock_renderer;

pub use mock_feed::MockReleaseFeed;
pub use mock_renderer::{MockPage, MockRenderer};
