//! Error taxonomy shared by every resolution operation.

use thiserror::Error;

use crate::episodes::FeedError;
use crate::renderer::RenderError;

/// Outcome classification for the three public operations.
///
/// `Validation` means the input was rejected before any upstream contact.
/// `NotFound` means the target entity is provably absent after a bounded,
/// exhaustive search. Everything that goes wrong against the collaborator
/// or its network collapses into `Upstream` with a human-readable message.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ResolveError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}

impl From<RenderError> for ResolveError {
    fn from(e: RenderError) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl From<FeedError> for ResolveError {
    fn from(e: FeedError) -> Self {
        Self::Upstream(e.to_string())
    }
}
