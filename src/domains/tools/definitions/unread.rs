//! Unread counts tool.

use serde::Deserialize;
use tracing::{info, instrument};

use super::ToolDefinition;
use crate::domains::feedly::{FeedlyClient, UnreadCountsQuery};
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::SideEffect;
use crate::domains::tools::render::{self, Envelope};
use crate::domains::tools::schema::{
    Constraint, FieldKind, FieldSpec, MAX_BATCH_SIZE, ParamSet, RESPONSE_FORMAT,
};

#[derive(Debug, Deserialize)]
struct UnreadCountsParams {
    stream_ids: Option<Vec<String>>,
    auto_refresh: Option<bool>,
    newer_than: Option<i64>,
}

/// Get unread counts per stream.
pub struct GetUnreadCountsTool;

impl ToolDefinition for GetUnreadCountsTool {
    const NAME: &'static str = "feedly_get_unread_counts";
    const TITLE: &'static str = "Get Unread Counts";
    const DESCRIPTION: &'static str = "Get unread article counts per stream (feed, category, tag), sorted by count descending. Use this to find streams with unread articles before fetching them.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional(
            "stream_ids",
            FieldKind::StringList,
            "Only report these stream IDs (e.g. 'feed/https://example.com/rss')",
        )
        .with_constraint(Constraint::ListLength {
            min: 1,
            max: MAX_BATCH_SIZE,
        }),
        FieldSpec::optional(
            "auto_refresh",
            FieldKind::Boolean,
            "Ask Feedly to refresh counts before answering",
        ),
        FieldSpec::optional(
            "newer_than",
            FieldKind::Integer,
            "Only count entries newer than this timestamp (epoch ms)",
        ),
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetUnreadCountsTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: UnreadCountsParams = params.decode()?;

        // Feedly narrows by a single streamId; anything more is filtered here.
        let query = UnreadCountsQuery {
            stream_id: match p.stream_ids.as_deref() {
                Some([only]) => Some(only.clone()),
                _ => None,
            },
            autorefresh: p.auto_refresh,
            newer_than: p.newer_than,
        };

        let mut counts = client.get_unread_counts(&query).await?.unreadcounts;
        if let Some(ids) = &p.stream_ids {
            counts.retain(|c| ids.contains(&c.id));
        }

        info!("Fetched unread counts for {} stream(s)", counts.len());
        Ok(render::unread_counts(&counts, params.response_format()))
    }
}
