//! Process-backed URL opener
//!
//! The URL is always passed as a single argv element, never through a shell,
//! so characters like `&` or `;` in a percent-decoded value can't break out.
//! stdout is captured rather than inherited because the MCP stream owns it.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::UrlOpener;
use crate::error::{ToolError, ToolResult};

#[cfg(target_os = "macos")]
const DEFAULT_PROGRAM: &str = "open";
#[cfg(target_os = "macos")]
const DEFAULT_ARGS: &[&str] = &[];

#[cfg(target_os = "windows")]
const DEFAULT_PROGRAM: &str = "rundll32";
#[cfg(target_os = "windows")]
const DEFAULT_ARGS: &[&str] = &["url.dll,FileProtocolHandler"];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_PROGRAM: &str = "xdg-open";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_ARGS: &[&str] = &[];

/// Opens URLs by spawning the platform's URL-open command
///
/// # Examples
///
/// ```
/// use cleanshot_mcp::dispatch::SystemOpener;
///
/// // Platform default: `open` on macOS
/// let opener = SystemOpener::new();
///
/// // Any program that takes the URL as its last argument
/// let opener = SystemOpener::with_command("xdg-open", Vec::<String>::new());
/// assert_eq!(opener.program(), "xdg-open");
/// ```
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
    /// Arguments placed before the URL
    args:    Vec<String>,
}

impl SystemOpener {
    /// Creates an opener for the current platform's default command
    pub fn new() -> Self {
        Self::with_command(DEFAULT_PROGRAM, DEFAULT_ARGS.iter().copied())
    }

    /// Creates an opener that runs `program args... <url>`
    pub fn with_command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args:    args.into_iter().map(Into::into).collect(),
        }
    }

    /// Program this opener spawns
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlOpener for SystemOpener {
    async fn open(&self, url: &str) -> ToolResult<()> {
        debug!(program = %self.program, %url, "spawning URL opener");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ToolError::Dispatch {
                url:    url.to_string(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let reason = if stderr.is_empty() {
            format!("{} exited with {}", self.program, output.status)
        } else {
            format!("{} exited with {}: {}", self.program, output.status, stderr)
        };

        Err(ToolError::Dispatch {
            url: url.to_string(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program() {
        let opener = SystemOpener::default();
        assert_eq!(opener.program(), DEFAULT_PROGRAM);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_uses_open() {
        assert_eq!(SystemOpener::new().program(), "open");
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_uses_file_protocol_handler() {
        let opener = SystemOpener::new();
        assert_eq!(opener.program(), "rundll32");
        assert_eq!(opener.args, vec!["url.dll,FileProtocolHandler".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_exit() {
        let opener = SystemOpener::with_command("true", Vec::<String>::new());
        assert!(opener.open("cleanshot://open-history").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_dispatch_error() {
        let opener = SystemOpener::with_command("false", Vec::<String>::new());
        let err = opener.open("cleanshot://open-history").await.unwrap_err();

        match err {
            ToolError::Dispatch { url, reason } => {
                assert_eq!(url, "cleanshot://open-history");
                assert!(reason.contains("false exited with"), "reason: {}", reason);
            }
            other => panic!("expected dispatch error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stderr_is_reported() {
        let opener = SystemOpener::with_command("sh", [
            "-c",
            "echo \"no handler for $1\" >&2; exit 3",
            "sh",
        ]);
        let err = opener.open("cleanshot://pin?filepath=a%26b").await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("no handler for cleanshot://pin?filepath=a%26b"), "msg: {}", msg);
        assert!(msg.contains("3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_url_is_single_argument() {
        let opener = SystemOpener::with_command("sh", [
            "-c",
            "[ \"$#\" -eq 1 ] && [ \"$1\" = 'cleanshot://pin?filepath=a%20b;c' ]",
            "sh",
        ]);
        assert!(opener.open("cleanshot://pin?filepath=a%20b;c").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_program_is_dispatch_error() {
        let opener =
            SystemOpener::with_command("cleanshot-mcp-no-such-opener", Vec::<String>::new());
        let err = opener.open("cleanshot://open-history").await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("failed to run cleanshot-mcp-no-such-opener"), "msg: {}", msg);
    }
}
