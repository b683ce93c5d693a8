//! Read-state tools.
//!
//! All four are idempotent upstream: repeating a call leaves the same state.
//! `feedly_keep_unread` is the inverse of `feedly_mark_as_read` and accepts
//! the same id lists.

use serde::Deserialize;
use tracing::{info, instrument};

use super::ToolDefinition;
use crate::domains::feedly::FeedlyClient;
use crate::domains::feedly::models::{MarkerAction, MarkerTarget};
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::SideEffect;
use crate::domains::tools::render::{self, Envelope, MarkerReceipt};
use crate::domains::tools::schema::{
    FieldKind, FieldSpec, ParamSet, RESPONSE_FORMAT, entry_ids,
};

const AS_OF: FieldSpec = FieldSpec::optional(
    "as_of",
    FieldKind::Integer,
    "Only mark entries older than this timestamp (epoch ms)",
);

#[derive(Debug, Deserialize)]
struct EntryIdsParams {
    entry_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FeedParams {
    feed_id: String,
    as_of: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
    category_id: String,
    as_of: Option<i64>,
}

/// Mark entries as read.
pub struct MarkAsReadTool;

impl ToolDefinition for MarkAsReadTool {
    const NAME: &'static str = "feedly_mark_as_read";
    const TITLE: &'static str = "Mark Articles as Read";
    const DESCRIPTION: &'static str = "Mark articles as read by their entry IDs (max 1000). Use this after processing articles to track progress; undo with feedly_keep_unread.";
    const FIELDS: &'static [FieldSpec] = &[
        entry_ids("List of entry IDs to mark as read (1-1000)"),
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::Destructive;
}

impl MarkAsReadTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: EntryIdsParams = params.decode()?;
        client.mark_as_read(&p.entry_ids).await?;
        info!("Marked {} entr(ies) as read", p.entry_ids.len());

        let receipt = MarkerReceipt {
            action: MarkerAction::MarkAsRead,
            target: MarkerTarget::Entries,
            ids: p.entry_ids,
            as_of: None,
        };
        Ok(render::receipt(&receipt, params.response_format()))
    }
}

/// Mark a whole feed as read.
pub struct MarkFeedAsReadTool;

impl ToolDefinition for MarkFeedAsReadTool {
    const NAME: &'static str = "feedly_mark_feed_as_read";
    const TITLE: &'static str = "Mark Feed as Read";
    const DESCRIPTION: &'static str = "Mark all articles in a feed as read at once, optionally only those older than 'as_of' (epoch ms).";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "feed_id",
            FieldKind::String,
            "Feed stream ID (format: 'feed/URL')",
        ),
        AS_OF,
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::Destructive;
}

impl MarkFeedAsReadTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: FeedParams = params.decode()?;
        client.mark_feed_as_read(&p.feed_id, p.as_of).await?;
        info!("Marked feed {} as read", p.feed_id);

        let receipt = MarkerReceipt {
            action: MarkerAction::MarkAsRead,
            target: MarkerTarget::Feeds,
            ids: vec![p.feed_id],
            as_of: p.as_of,
        };
        Ok(render::receipt(&receipt, params.response_format()))
    }
}

/// Mark a whole category as read.
pub struct MarkCategoryAsReadTool;

impl ToolDefinition for MarkCategoryAsReadTool {
    const NAME: &'static str = "feedly_mark_category_as_read";
    const TITLE: &'static str = "Mark Category as Read";
    const DESCRIPTION: &'static str = "Mark all articles in a category (folder) as read at once, optionally only those older than 'as_of' (epoch ms).";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "category_id",
            FieldKind::String,
            "Category stream ID (format: 'user/ID/category/label')",
        ),
        AS_OF,
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::Destructive;
}

impl MarkCategoryAsReadTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: CategoryParams = params.decode()?;
        client.mark_category_as_read(&p.category_id, p.as_of).await?;
        info!("Marked category {} as read", p.category_id);

        let receipt = MarkerReceipt {
            action: MarkerAction::MarkAsRead,
            target: MarkerTarget::Categories,
            ids: vec![p.category_id],
            as_of: p.as_of,
        };
        Ok(render::receipt(&receipt, params.response_format()))
    }
}

/// Restore entries to unread.
pub struct KeepUnreadTool;

impl ToolDefinition for KeepUnreadTool {
    const NAME: &'static str = "feedly_keep_unread";
    const TITLE: &'static str = "Keep Articles Unread";
    const DESCRIPTION: &'static str = "Keep articles unread (undo feedly_mark_as_read) by their entry IDs (max 1000).";
    const FIELDS: &'static [FieldSpec] = &[
        entry_ids("List of entry IDs to keep unread (1-1000)"),
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::IdempotentWrite;
}

impl KeepUnreadTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: EntryIdsParams = params.decode()?;
        client.keep_unread(&p.entry_ids).await?;
        info!("Kept {} entr(ies) unread", p.entry_ids.len());

        let receipt = MarkerReceipt {
            action: MarkerAction::KeepUnread,
            target: MarkerTarget::Entries,
            ids: p.entry_ids,
            as_of: None,
        };
        Ok(render::receipt(&receipt, params.response_format()))
    }
}
