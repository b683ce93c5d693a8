//! Tool-specific error types.

use thiserror::Error;

use super::schema::ValidationError;
use crate::domains::feedly::FeedlyError;

/// Errors that can occur during tool operations.
///
/// `UnknownTool` and `InvalidArguments` are raised locally, before any
/// network call. `Api` wraps everything that came back from Feedly.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Parameters failed schema validation.
    #[error(transparent)]
    InvalidArguments(#[from] ValidationError),

    /// The Feedly call failed.
    #[error(transparent)]
    Api(#[from] FeedlyError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was detected before reaching Feedly.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::InvalidArguments(_))
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("Failed to decode validated parameters: {}", err))
    }
}
