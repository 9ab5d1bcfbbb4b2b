use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the rendering collaborator.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Readiness condition not met: {0}")]
    Readiness(String),

    #[error("In-page script failed: {0}")]
    Script(String),

    #[error("Failed to release rendering resource: {0}")]
    Release(String),
}

/// Readiness condition for a navigation.
#[derive(Debug, Clone)]
pub enum WaitFor {
    /// The document reached DOMContentLoaded; nothing further.
    DomContentLoaded,
    /// A CSS selector must match before extraction may start.
    Selector(String),
}

/// A loaded document, exclusively owned by the operation that opened it.
///
/// Must be released via `close` on every exit path. Closing the owning
/// session also tears down its pages, so a failed page close is degraded
/// rather than fatal.
#[async_trait]
pub trait RenderPage: Send + Sync {
    /// Navigate to `url` and block until the readiness condition holds.
    async fn navigate(&self, url: &str, wait: WaitFor) -> Result<(), RenderError>;

    /// Evaluate a script in the document's context and return its value.
    /// Promises are awaited before the value is serialized back.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, RenderError>;

    /// Current document title.
    async fn title(&self) -> Result<String, RenderError>;

    /// Release the page.
    async fn close(self: Box<Self>) -> Result<(), RenderError>;
}

/// One exclusively-owned rendering session (a browser instance).
#[async_trait]
pub trait RenderSession: Send + Sync {
    /// Open an independent page context within this session.
    async fn open_page(&self) -> Result<Box<dyn RenderPage>, RenderError>;

    /// Release the session and everything it owns.
    async fn close(self: Box<Self>) -> Result<(), RenderError>;
}

/// Factory for rendering sessions, one per public operation.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError>;
}
