//! Subscription, category and tag listing tools.

use tracing::{info, instrument};

use super::ToolDefinition;
use crate::domains::feedly::FeedlyClient;
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::SideEffect;
use crate::domains::tools::render::{self, Envelope};
use crate::domains::tools::schema::{FieldSpec, ParamSet, RESPONSE_FORMAT};

/// List all feed subscriptions.
pub struct GetSubscriptionsTool;

impl ToolDefinition for GetSubscriptionsTool {
    const NAME: &'static str = "feedly_get_subscriptions";
    const TITLE: &'static str = "Get Feed Subscriptions";
    const DESCRIPTION: &'static str = "List all feed subscriptions with feed ID, title, website and categories. Feed IDs have the format 'feed/https://example.com/rss'.";
    const FIELDS: &'static [FieldSpec] = &[RESPONSE_FORMAT];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetSubscriptionsTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let subscriptions = client.get_subscriptions().await?;
        info!("Fetched {} subscription(s)", subscriptions.len());
        Ok(render::subscriptions(&subscriptions, params.response_format()))
    }
}

/// List all categories.
pub struct GetCategoriesTool;

impl ToolDefinition for GetCategoriesTool {
    const NAME: &'static str = "feedly_get_categories";
    const TITLE: &'static str = "Get Categories";
    const DESCRIPTION: &'static str = "List all categories (folders) with their IDs. Category IDs have the format 'user/{userId}/category/{label}'.";
    const FIELDS: &'static [FieldSpec] = &[RESPONSE_FORMAT];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetCategoriesTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let categories = client.get_categories().await?;
        info!("Fetched {} categor(ies)", categories.len());
        Ok(render::categories(&categories, params.response_format()))
    }
}

/// List all tags.
pub struct GetTagsTool;

impl ToolDefinition for GetTagsTool {
    const NAME: &'static str = "feedly_get_tags";
    const TITLE: &'static str = "Get Tags";
    const DESCRIPTION: &'static str = "List all tags with their IDs, including the saved-articles tag 'user/{userId}/tag/global.saved'.";
    const FIELDS: &'static [FieldSpec] = &[RESPONSE_FORMAT];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetTagsTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let tags = client.get_tags().await?;
        info!("Fetched {} tag(s)", tags.len());
        Ok(render::tags(&tags, params.response_format()))
    }
}
