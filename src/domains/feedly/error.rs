//! Feedly API error types.
//!
//! Every failure that crosses the client boundary is one of these variants.
//! The `Display` strings are what the calling agent sees, so they stay short,
//! stable and actionable. Transport internals are logged, never surfaced.

use thiserror::Error;
use tracing::warn;

/// Longest upstream body excerpt carried by [`FeedlyError::Upstream`].
const BODY_SNIPPET_LIMIT: usize = 200;

/// Errors that can occur while talking to the Feedly API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedlyError {
    /// The client could not be configured (missing token, bad base URL).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP 401.
    #[error("Authentication failed. Check FEEDLY_ACCESS_TOKEN.")]
    Authentication,

    /// HTTP 403.
    #[error("Access forbidden. Check your Feedly plan.")]
    Forbidden,

    /// HTTP 404, or an entry lookup that came back empty.
    #[error("Resource not found. Check the ID.")]
    NotFound,

    /// HTTP 429.
    #[error("Rate limit exceeded. Wait before retrying.")]
    RateLimited,

    /// The request exceeded the configured timeout.
    #[error("Request timed out. Try again.")]
    Timeout,

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream host could not be reached.
    #[error("Could not reach Feedly. Check your network connection.")]
    Connection,

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from Feedly.")]
    InvalidResponse,
}

impl FeedlyError {
    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            _ => Self::Upstream {
                status,
                body: snippet(body),
            },
        }
    }
}

impl From<reqwest::Error> for FeedlyError {
    fn from(err: reqwest::Error) -> Self {
        warn!("Feedly request failed: {:?}", err);
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), "")
        } else {
            Self::Connection
        }
    }
}

/// Trim an upstream body to a single-line excerpt.
fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= BODY_SNIPPET_LIMIT {
        return body.to_string();
    }
    let cut: String = body.chars().take(BODY_SNIPPET_LIMIT).collect();
    format!("{}...", cut)
}
