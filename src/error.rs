//! Error types for tool routing, argument validation and URL dispatch
//!
//! Every failure a tool call can hit is one of three kinds:
//! - [`ToolError::UnknownTool`]: the requested tool name is not in the fixed set
//! - [`ToolError::Validation`]: the arguments violate the tool's static schema
//! - [`ToolError::Dispatch`]: the system URL opener failed
//!
//! All of them are reported back to the MCP client as an error-flagged tool
//! result with an actionable remediation hint. None of them are fatal.

use crate::model::Operation;

/// Result type alias for tool invocations
pub type ToolResult<T> = Result<T, ToolError>;

/// Argument mapping does not match an operation's schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Argument not declared by the operation
    #[error("Unknown argument '{field}' for {operation}")]
    UnknownField {
        /// Operation path the arguments were validated against
        operation: String,
        /// Name of the undeclared argument
        field:     String,
    },

    /// Required argument absent or null
    #[error("Missing required argument '{field}' for {operation}")]
    MissingField {
        operation: String,
        field:     String,
    },

    /// Argument value has the wrong JSON type
    #[error("Invalid type for argument '{field}': expected {expected}, received {received}")]
    TypeMismatch {
        field:    String,
        /// JSON type the schema declares
        expected: &'static str,
        /// JSON type the caller sent
        received: &'static str,
    },

    /// Enumerated argument outside its declared set
    #[error(
        "Invalid value '{value}' for argument '{field}': expected one of {}",
        .allowed.join(", ")
    )]
    InvalidEnumValue {
        field:   String,
        value:   String,
        /// Literal values the schema accepts
        allowed: &'static [&'static str],
    },
}

impl ValidationError {
    /// Name of the argument that failed validation
    pub fn field(&self) -> &str {
        match self {
            ValidationError::UnknownField { field, .. }
            | ValidationError::MissingField { field, .. }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::InvalidEnumValue { field, .. } => field,
        }
    }
}

/// Comprehensive error type for a single tool invocation
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool name is not one of the advertised CleanShot tools
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Name sent by the client
        name: String,
    },

    /// Arguments rejected before anything was dispatched
    #[error("Invalid arguments for {tool}: {source}")]
    Validation {
        /// Tool whose schema rejected the arguments
        tool:   &'static str,
        #[source]
        source: ValidationError,
    },

    /// The system opener could not hand the URL to CleanShot
    #[error("Failed to open CleanShot URL {url}: {reason}")]
    Dispatch {
        /// URL that was being opened
        url:    String,
        /// Underlying spawn error or exit status and stderr
        reason: String,
    },
}

impl ToolError {
    /// Wraps a schema violation for `operation`
    pub fn validation(operation: Operation, source: ValidationError) -> Self {
        ToolError::Validation {
            tool: operation.tool_name(),
            source,
        }
    }

    /// Returns an actionable remediation hint for this error
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanshot_mcp::error::ToolError;
    ///
    /// let error = ToolError::UnknownTool {
    ///     name: "cleanshot_teleport".to_string(),
    /// };
    ///
    /// assert!(error.remediation_hint().contains("tools/list"));
    /// ```
    pub fn remediation_hint(&self) -> &str {
        match self {
            ToolError::UnknownTool { .. } => {
                "Call tools/list to see the available CleanShot tools. Tool names are prefixed \
                 with 'cleanshot_'."
            }
            ToolError::Validation { source, .. } => match source {
                ValidationError::UnknownField { .. } => {
                    "Remove the argument. Check the tool's input schema for accepted arguments."
                }
                ValidationError::MissingField { .. } => {
                    "Supply the required argument and retry."
                }
                ValidationError::TypeMismatch { .. } => {
                    "Send the argument with the JSON type declared in the input schema. Numbers \
                     and booleans must not be quoted."
                }
                ValidationError::InvalidEnumValue { .. } => {
                    "Use one of the listed values exactly. Matching is case-sensitive."
                }
            },
            ToolError::Dispatch { .. } => {
                "Make sure CleanShot X is installed and running, and that the system URL opener \
                 is available. CleanShot URLs only work on macOS."
            }
        }
    }
}
