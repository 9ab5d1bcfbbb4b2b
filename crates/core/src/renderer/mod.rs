//! Rendering collaborator boundary.
//!
//! The resolution logic never touches a DOM API directly. It talks to a
//! capability interface: navigate a page with a readiness condition, run a
//! script in the loaded document's context, and release the page. The
//! production implementation drives headless Chrome via chromiumoxide;
//! tests substitute `testing::MockRenderer`.

mod chromium;
mod types;

pub use chromium::ChromiumRenderer;
pub use types::*;
