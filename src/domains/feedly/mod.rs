//! Feedly domain module.
//!
//! The single choke point for upstream communication:
//!
//! - `client.rs` - authenticated async HTTP client, one method per capability
//! - `models.rs` - typed views over Feedly payloads and marker requests
//! - `error.rs` - the normalized upstream error taxonomy

mod client;
mod error;
pub mod models;

pub use client::{
    FeedlyClient, FeedlyResult, Ranked, StreamQuery, USER_AGENT, UnreadCountsQuery,
};
pub use error::FeedlyError;
