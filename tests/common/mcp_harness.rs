//! MCP Server Test Harness
//!
//! Provides reusable fixtures for exercising the CleanShot MCP server with a
//! recording opener, so no test ever launches a real URL handler.
//!
//! # Usage
//!
//! ```rust
//! use common::mcp_harness::{ContentValidator, McpTestContext};
//!
//! #[tokio::test]
//! async fn test_pin() {
//!     let ctx = McpTestContext::new_with_mock();
//!     let result = ctx.call("cleanshot_pin", json!({"filepath": "/tmp/a.png"})).await;
//!     let url = ContentValidator::validate_success(&result).unwrap();
//!     assert_eq!(url, "cleanshot://pin?filepath=%2Ftmp%2Fa.png");
//! }
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use cleanshot_mcp::{dispatch::MockOpener, mcp::CleanShotMcpServer};
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;

/// Test fixture for MCP server integration tests
///
/// Wraps a `CleanShotMcpServer` together with the `MockOpener` it dispatches
/// to, so tests can assert on exactly which URLs were opened.
pub struct McpTestContext {
    /// The MCP server instance
    pub server: CleanShotMcpServer,
    /// Opener shared with the server
    pub opener: Arc<MockOpener>,
}

impl McpTestContext {
    /// Create test context with an opener that accepts every URL
    pub fn new_with_mock() -> Self {
        Self::new_with_configured_mock(MockOpener::new())
    }

    /// Create test context with a configured MockOpener
    ///
    /// ```rust
    /// let ctx = McpTestContext::new_with_configured_mock(
    ///     MockOpener::new().with_error("open exited with exit status: 1"),
    /// );
    /// ```
    pub fn new_with_configured_mock(mock: MockOpener) -> Self {
        let opener = Arc::new(mock);
        let server = CleanShotMcpServer::new(opener.clone());
        Self { server, opener }
    }

    // --- Tool invocation helpers ---

    /// Call a tool with a JSON object of arguments
    pub async fn call(&self, tool: &str, arguments: Value) -> CallToolResult {
        let arguments: Option<JsonObject> = arguments.as_object().cloned();
        self.server.invoke(tool, arguments).await
    }

    /// Call a tool without any arguments
    pub async fn call_without_arguments(&self, tool: &str) -> CallToolResult {
        self.server.invoke(tool, None).await
    }

    // --- Utility methods ---

    /// URLs the server handed to the opener, in order
    pub fn opened_urls(&self) -> Vec<String> {
        self.opener.opened()
    }

    /// Number of dispatch attempts
    pub fn dispatch_count(&self) -> usize {
        self.opener.call_count()
    }
}

// ============================================================================
// Content Validators
// ============================================================================

/// Validation utilities for MCP tool responses
pub struct ContentValidator;

impl ContentValidator {
    /// Extract the single text content item
    pub fn text(result: &CallToolResult) -> Result<String, String> {
        if result.content.len() != 1 {
            return Err(format!("Expected 1 content item, got {}", result.content.len()));
        }
        let text = result.content[0]
            .as_text()
            .ok_or("Content is not text")?;
        Ok(text.text.clone())
    }

    /// Validate a successful dispatch result and return the opened URL
    ///
    /// Checks that the text content and the structured receipt agree on the
    /// URL.
    pub fn validate_success(result: &CallToolResult) -> Result<String, String> {
        if result.is_error.unwrap_or(false) {
            return Err(format!("Unexpected error result: {:?}", Self::text(result)));
        }

        let text = Self::text(result)?;
        let receipt = result
            .structured_content
            .as_ref()
            .ok_or("Missing structured content")?;
        let url = receipt["url"]
            .as_str()
            .ok_or("Receipt missing url")?
            .to_string();

        if !text.ends_with(&format!(": {}", url)) {
            return Err(format!("Text '{}' does not end with URL '{}'", text, url));
        }
        Ok(url)
    }

    /// Validate an error-flagged result and return its message
    pub fn validate_error(result: &CallToolResult) -> Result<String, String> {
        if result.is_error != Some(true) {
            return Err("Expected is_error to be true".to_string());
        }
        let text = Self::text(result)?;
        if !text.starts_with("Error: ") {
            return Err(format!("Error text should start with 'Error: ', got '{}'", text));
        }
        Ok(text)
    }
}
