//! Domains module containing business logic organized by bounded contexts.
//!
//! - **feedly**: HTTP client and wire models for the Feedly Cloud API
//! - **tools**: the MCP tools, their argument schemas and renderers
//! - **resources**: read-only reference documents for MCP clients

pub mod feedly;
pub mod resources;
pub mod tools;
