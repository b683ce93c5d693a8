//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! This module builds the ToolRouter for STDIO/TCP transport. Every route
//! delegates to the shared registry, so the router and the HTTP dispatch
//! can never disagree about which tools exist.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};
use serde_json::Value;

use super::registry::{ToolDescriptor, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .descriptors()
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(descriptor, registry.clone()))
        })
}

/// Create a ToolRoute that validates and dispatches through the registry.
fn create_route<S>(descriptor: &'static ToolDescriptor, registry: Arc<ToolRegistry>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = descriptor.name;
    ToolRoute::new_dyn(descriptor.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let registry = registry.clone();
        let args = ctx.arguments.clone().map(Value::Object).unwrap_or(Value::Null);
        async move { registry.call_tool_result(name, args).await }.boxed()
    })
}
