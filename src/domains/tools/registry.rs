//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The static descriptor table for every tool (name, schema, side effect)
//! - Validation and dispatch of tool calls, shared by every transport
//! - Mapping of tool outcomes onto MCP results

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, Tool, ToolAnnotations},
};
use serde_json::Value;
use tracing::{debug, warn};

use super::definitions::{
    GetCategoriesTool, GetEntriesTool, GetEntryTool, GetProfileTool, GetStreamContentsTool,
    GetSubscriptionsTool, GetTagsTool, GetUnreadCountsTool, KeepUnreadTool, MarkAsReadTool,
    MarkCategoryAsReadTool, MarkFeedAsReadTool, ToolDefinition,
};
use super::error::ToolError;
use super::render::Envelope;
use super::schema::{self, FieldSpec};
use crate::domains::feedly::FeedlyClient;

/// What a tool does to upstream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Fetches only.
    ReadOnly,
    /// Changes read state; repeating it is harmless.
    Destructive,
    /// Changes read state without discarding anything.
    IdempotentWrite,
}

impl SideEffect {
    /// MCP hints advertised to hosts. Every tool talks to Feedly, so all are open-world.
    pub fn annotations(self, title: &str) -> ToolAnnotations {
        let (read_only, destructive) = match self {
            Self::ReadOnly => (true, false),
            Self::Destructive => (false, true),
            Self::IdempotentWrite => (false, false),
        };

        ToolAnnotations {
            title: Some(title.to_string()),
            read_only_hint: Some(read_only),
            destructive_hint: Some(destructive),
            idempotent_hint: Some(true),
            open_world_hint: Some(true),
        }
    }
}

/// Static metadata for one tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    pub side_effect: SideEffect,
}

impl ToolDescriptor {
    pub const fn of<T: ToolDefinition>() -> Self {
        Self {
            name: T::NAME,
            title: T::TITLE,
            description: T::DESCRIPTION,
            fields: T::FIELDS,
            side_effect: T::SIDE_EFFECT,
        }
    }

    /// Convert into the rmcp `Tool` model advertised in `tools/list`.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(schema::input_schema(self.fields)),
            annotations: Some(self.side_effect.annotations(self.title)),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.title.into()),
        }
    }
}

const DESCRIPTORS: [ToolDescriptor; 12] = [
    ToolDescriptor::of::<GetProfileTool>(),
    ToolDescriptor::of::<GetSubscriptionsTool>(),
    ToolDescriptor::of::<GetCategoriesTool>(),
    ToolDescriptor::of::<GetTagsTool>(),
    ToolDescriptor::of::<GetUnreadCountsTool>(),
    ToolDescriptor::of::<GetStreamContentsTool>(),
    ToolDescriptor::of::<GetEntryTool>(),
    ToolDescriptor::of::<GetEntriesTool>(),
    ToolDescriptor::of::<MarkAsReadTool>(),
    ToolDescriptor::of::<MarkFeedAsReadTool>(),
    ToolDescriptor::of::<MarkCategoryAsReadTool>(),
    ToolDescriptor::of::<KeepUnreadTool>(),
];

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Validating and dispatching tool calls against the shared Feedly client
pub struct ToolRegistry {
    client: Arc<FeedlyClient>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by `client`.
    pub fn new(client: Arc<FeedlyClient>) -> Self {
        Self { client }
    }

    /// All tool descriptors, in listing order.
    pub fn descriptors(&self) -> &'static [ToolDescriptor] {
        &DESCRIPTORS
    }

    /// Look up a tool by exact name.
    pub fn descriptor(&self, name: &str) -> Option<&'static ToolDescriptor> {
        DESCRIPTORS.iter().find(|d| d.name == name)
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        DESCRIPTORS.iter().map(|d| d.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        DESCRIPTORS.iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Validate `arguments` and run the named tool.
    ///
    /// Unknown names and invalid arguments fail before any request is sent.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Envelope, ToolError> {
        let Some(descriptor) = self.descriptor(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::unknown_tool(name));
        };

        let params = schema::validate(descriptor.fields, arguments).inspect_err(|e| {
            debug!(tool = name, "Rejected arguments: {}", e);
        })?;

        let client = self.client.as_ref();
        match descriptor.name {
            GetProfileTool::NAME => GetProfileTool::execute(client, &params).await,
            GetSubscriptionsTool::NAME => GetSubscriptionsTool::execute(client, &params).await,
            GetCategoriesTool::NAME => GetCategoriesTool::execute(client, &params).await,
            GetTagsTool::NAME => GetTagsTool::execute(client, &params).await,
            GetUnreadCountsTool::NAME => GetUnreadCountsTool::execute(client, &params).await,
            GetStreamContentsTool::NAME => GetStreamContentsTool::execute(client, &params).await,
            GetEntryTool::NAME => GetEntryTool::execute(client, &params).await,
            GetEntriesTool::NAME => GetEntriesTool::execute(client, &params).await,
            MarkAsReadTool::NAME => MarkAsReadTool::execute(client, &params).await,
            MarkFeedAsReadTool::NAME => MarkFeedAsReadTool::execute(client, &params).await,
            MarkCategoryAsReadTool::NAME => MarkCategoryAsReadTool::execute(client, &params).await,
            KeepUnreadTool::NAME => KeepUnreadTool::execute(client, &params).await,
            other => Err(ToolError::internal(format!("No handler for tool: {}", other))),
        }
    }

    /// Run a tool and map the outcome onto an MCP result.
    ///
    /// Argument problems become protocol errors; Feedly failures become
    /// tool results flagged `isError` so the model can read the message.
    pub async fn call_tool_result(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        into_call_result(self.call_tool(name, arguments).await)
    }
}

/// Map a tool outcome onto the MCP result shape.
pub fn into_call_result(outcome: Result<Envelope, ToolError>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(envelope) => Ok(CallToolResult::success(vec![Content::text(envelope.body)])),
        Err(e @ (ToolError::UnknownTool(_) | ToolError::InvalidArguments(_))) => {
            Err(McpError::invalid_params(e.to_string(), None))
        }
        Err(ToolError::Api(e)) => Ok(CallToolResult::error(vec![Content::text(format!(
            "Error: {}",
            e
        ))])),
        Err(e @ ToolError::Internal(_)) => Err(McpError::internal_error(e.to_string(), None)),
    }
}
