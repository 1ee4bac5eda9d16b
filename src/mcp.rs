//! MCP service implementation with tool routing
//!
//! This module provides the cleanshot-mcp server. Tool metadata is generated
//! from the static operation table in [`crate::model`], and every
//! `tools/call` runs the same pipeline:
//!
//! 1. Route the tool name to an [`Operation`]
//! 2. Validate the arguments against its field table
//! 3. Build the `cleanshot://` URL
//! 4. Hand the URL to the [`UrlOpener`]
//!
//! Any failure along the way becomes an error-flagged `CallToolResult`, never
//! a JSON-RPC error, so clients always get a readable message.

use std::sync::Arc;

use rmcp::{
    RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        JsonObject, ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tracing::{debug, info, warn};

use crate::{
    dispatch::{SystemOpener, UrlOpener},
    error::{ToolError, ToolResult},
    model::{DispatchReceipt, Operation},
    schema::{input_schema, validate_arguments},
    url::build_url,
};

/// Server name reported during MCP initialization
pub const SERVER_NAME: &str = "cleanshot-mcp";

const INSTRUCTIONS: &str = "Controls CleanShot X on macOS through its cleanshot:// URL scheme. \
                            Each tool opens one CleanShot action; the result echoes the URL that \
                            was opened. CleanShot does not report back whether the action \
                            completed.";

/// CleanShot MCP server
///
/// Stateless apart from the shared opener; cloning is cheap and concurrent
/// calls are independent.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use cleanshot_mcp::{dispatch::MockOpener, mcp::CleanShotMcpServer};
///
/// #[tokio::main]
/// async fn main() {
///     let opener = Arc::new(MockOpener::new());
///     let server = CleanShotMcpServer::new(opener.clone());
///
///     let result = server.invoke("cleanshot_open_history", None).await;
///     assert!(!result.is_error.unwrap_or(false));
///     assert_eq!(opener.last_url().as_deref(), Some("cleanshot://open-history"));
/// }
/// ```
#[derive(Clone)]
pub struct CleanShotMcpServer {
    /// Side-effecting URL opener; swapped for a mock in tests
    opener: Arc<dyn UrlOpener>,
}

impl CleanShotMcpServer {
    /// Creates a server that dispatches through `opener`
    pub fn new(opener: Arc<dyn UrlOpener>) -> Self {
        Self { opener }
    }

    /// Creates a server using the platform's default URL opener
    pub fn with_system_opener() -> Self {
        Self::new(Arc::new(SystemOpener::new()))
    }

    /// Tool definitions advertised in `tools/list`, one per operation
    pub fn tools(&self) -> Vec<Tool> {
        let output_schema = receipt_schema();
        Operation::ALL
            .iter()
            .map(|operation| {
                let mut tool = Tool::new(
                    operation.tool_name(),
                    operation.description(),
                    Arc::new(input_schema(*operation)),
                );
                tool.output_schema = output_schema.clone();
                tool
            })
            .collect()
    }

    /// Runs one tool call and wraps the outcome in a `CallToolResult`
    ///
    /// Success yields the summary text plus a [`DispatchReceipt`] as
    /// structured content. Routing, validation and dispatch failures all
    /// yield `is_error: Some(true)` with the message and a remediation hint.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        match self.execute(name, arguments.unwrap_or_default()).await {
            Ok(receipt) => {
                let mut result = CallToolResult::success(vec![Content::text(
                    receipt.message.clone(),
                )]);
                result.structured_content = serde_json::to_value(&receipt).ok();
                result
            }
            Err(error) => {
                warn!(tool = %name, %error, "tool call failed");
                CallToolResult::error(vec![Content::text(format!(
                    "Error: {}\nHint: {}",
                    error,
                    error.remediation_hint()
                ))])
            }
        }
    }

    /// Routes, validates, builds and dispatches a single tool call
    ///
    /// Validation always completes before the opener is touched, so a
    /// rejected call has no side effects.
    pub async fn execute(&self, name: &str, arguments: JsonObject) -> ToolResult<DispatchReceipt> {
        let operation = Operation::from_tool_name(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
        })?;

        let args = validate_arguments(operation, &arguments)
            .map_err(|e| ToolError::validation(operation, e))?;

        let url = build_url(operation, &args);
        debug!(tool = %name, %url, "dispatching CleanShot URL");

        self.opener.open(&url).await?;

        info!(tool = %name, %url, "opened CleanShot URL");
        Ok(DispatchReceipt::new(operation, url))
    }
}

impl Default for CleanShotMcpServer {
    fn default() -> Self {
        Self::with_system_opener()
    }
}

fn receipt_schema() -> Option<Arc<JsonObject>> {
    match serde_json::to_value(schemars::schema_for!(DispatchReceipt)) {
        Ok(serde_json::Value::Object(schema)) => Some(Arc::new(schema)),
        _ => None,
    }
}

// Implement ServerHandler to make CleanShotMcpServer a valid Service
impl ServerHandler for CleanShotMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.invoke(&request.name, request.arguments).await)
    }
}
