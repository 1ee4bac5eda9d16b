//! cleanshot-mcp: MCP server for the CleanShot X URL scheme
//!
//! This library exposes CleanShot X actions as Model Context Protocol tools.
//! Each tool call is validated against a static per-operation schema,
//! serialized into a `cleanshot://` URL and handed to the operating system's
//! default URL opener.

pub mod dispatch;
pub mod error;
pub mod mcp;
pub mod model;
pub mod schema;
pub mod url;
