//! URL dispatch to the host's default handler
//!
//! The only side effect in this crate is asking the operating system to open
//! a `cleanshot://` URL. That effect sits behind the [`UrlOpener`] trait so
//! the MCP layer can be exercised with [`MockOpener`] and never spawn a
//! process in tests.
//!
//! - [`SystemOpener`]: spawns `open` (macOS), `xdg-open` (Linux) or
//!   `rundll32 url.dll,FileProtocolHandler` (Windows)
//! - [`MockOpener`]: records URLs and optionally fails

use async_trait::async_trait;

use crate::error::ToolResult;

pub mod mock;
pub mod system;

pub use mock::MockOpener;
pub use system::SystemOpener;

/// Hands a URL to whatever application is registered for its scheme
///
/// Success means the OS accepted the URL. CleanShot itself reports nothing
/// back, so a successful open does not mean the capture happened.
///
/// Implementations must be thread-safe (`Send + Sync`); concurrent opens are
/// independent of each other.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Opens `url` with the default handler
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Dispatch`](crate::error::ToolError::Dispatch) when
    /// the opener cannot be spawned or exits unsuccessfully. Never retried.
    async fn open(&self, url: &str) -> ToolResult<()>;
}
