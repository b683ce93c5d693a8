//! Tools domain module.
//!
//! This module handles all Feedly tools exposed over MCP. Each call runs the
//! same pipeline: validate arguments, call Feedly, render the answer.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, grouped by Feedly resource
//! - `schema.rs` - Field tables, argument validation and JSON Schema generation
//! - `render/` - Markdown and JSON rendering of Feedly payloads
//! - `registry.rs` - Descriptor table and dispatch shared by all transports
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a unit struct implementing `ToolDefinition` in `definitions/`
//! 2. Give it an async `execute(client, params)` returning an `Envelope`
//! 3. Add its descriptor and dispatch arm in `registry.rs`
//!
//! The router is built from the registry, so `server.rs` never changes.

pub mod definitions;
mod error;
mod registry;
pub mod render;
pub mod router;
pub mod schema;

pub use error::ToolError;
pub use registry::{SideEffect, ToolDescriptor, ToolRegistry, into_call_result};
pub use router::build_tool_router;
