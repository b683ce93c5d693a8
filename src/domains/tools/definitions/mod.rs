//! Tool definitions module.
//!
//! Each tool declares its name, description, parameter table and side-effect
//! class through [`ToolDefinition`], and implements an async `execute()` that
//! calls the Feedly client and renders the result. Related tools share a file.

pub mod account;
pub mod collections;
pub mod entries;
pub mod markers;
pub mod stream;
pub mod unread;

pub use account::GetProfileTool;
pub use collections::{GetCategoriesTool, GetSubscriptionsTool, GetTagsTool};
pub use entries::{GetEntriesTool, GetEntryTool};
pub use markers::{KeepUnreadTool, MarkAsReadTool, MarkCategoryAsReadTool, MarkFeedAsReadTool};
pub use stream::GetStreamContentsTool;
pub use unread::GetUnreadCountsTool;

use super::registry::SideEffect;
use super::schema::FieldSpec;

/// Static metadata every tool provides.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Short human-readable title.
    const TITLE: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Accepted parameters.
    const FIELDS: &'static [FieldSpec];

    /// What calling the tool does to upstream state.
    const SIDE_EFFECT: SideEffect;
}
