//! Feedly MCP Server Library
//!
//! This crate exposes a Feedly account to MCP clients: reading subscriptions,
//! categories, tags and articles, and changing read state.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **feedly**: Async client for the Feedly Cloud API
//!   - **tools**: MCP tools, argument validation and response rendering
//!   - **resources**: Data resources that can be read by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use feedly_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
