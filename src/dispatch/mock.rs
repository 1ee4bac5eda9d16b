//! Mock URL opener for testing
//!
//! `MockOpener` records every URL it is asked to open instead of spawning a
//! process, and can be told to fail so error paths are testable without a
//! real handler.
//!
//! # Examples
//!
//! ```
//! use cleanshot_mcp::dispatch::{MockOpener, UrlOpener};
//!
//! #[tokio::main]
//! async fn main() {
//!     let opener = MockOpener::new();
//!     opener.open("cleanshot://open-history").await.unwrap();
//!     assert_eq!(opener.opened(), vec!["cleanshot://open-history".to_string()]);
//!
//!     let failing = MockOpener::new().with_error("open exited with exit status: 1");
//!     assert!(failing.open("cleanshot://open-history").await.is_err());
//!     assert_eq!(failing.call_count(), 1);
//! }
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;

use super::UrlOpener;
use crate::error::{ToolError, ToolResult};

/// Recording test double for [`UrlOpener`]
///
/// Thread-safe; share it with `Arc` and inspect it after the server ran.
#[derive(Debug, Default)]
pub struct MockOpener {
    /// Every URL passed to `open`, failed attempts included
    opened:          Mutex<Vec<String>>,
    /// Failure text returned from every `open` call when set
    error_injection: Option<String>,
}

impl MockOpener {
    /// Creates a mock that accepts every URL
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `open` call fail with a dispatch error carrying `reason`
    pub fn with_error(mut self, reason: impl Into<String>) -> Self {
        self.error_injection = Some(reason.into());
        self
    }

    /// URLs received so far, in call order
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// Number of `open` calls so far
    pub fn call_count(&self) -> usize {
        self.opened.lock().len()
    }

    /// Most recent URL received
    pub fn last_url(&self) -> Option<String> {
        self.opened.lock().last().cloned()
    }
}

#[async_trait]
impl UrlOpener for MockOpener {
    async fn open(&self, url: &str) -> ToolResult<()> {
        self.opened.lock().push(url.to_string());

        match &self.error_injection {
            Some(reason) => Err(ToolError::Dispatch {
                url:    url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
