//! Stream contents tool.
//!
//! Fetches one page of articles from a feed, category or tag. The
//! continuation token returned with a page is opaque and is passed back
//! verbatim to get the next page.

use serde::Deserialize;
use tracing::{info, instrument};

use super::ToolDefinition;
use crate::domains::feedly::{FeedlyClient, Ranked, StreamQuery};
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::SideEffect;
use crate::domains::tools::render::{self, Envelope};
use crate::domains::tools::schema::{
    Constraint, DefaultValue, FieldKind, FieldSpec, ParamSet, RESPONSE_FORMAT,
};

/// Articles per page when `count` is omitted.
pub const DEFAULT_COUNT: i64 = 20;

/// Largest page size forwarded to Feedly; larger requests are clamped.
pub const MAX_COUNT: i64 = 100;

#[derive(Debug, Deserialize)]
struct StreamContentsParams {
    stream_id: String,
    count: u32,
    continuation: Option<String>,
    unread_only: bool,
    ranked: Ranked,
    newer_than: Option<i64>,
}

/// Fetch articles from a stream.
pub struct GetStreamContentsTool;

impl ToolDefinition for GetStreamContentsTool {
    const NAME: &'static str = "feedly_get_stream_contents";
    const TITLE: &'static str = "Get Stream Contents";
    const DESCRIPTION: &'static str = "Fetch articles from a Feedly stream (feed, category or tag) for reading and summarization. Returns id, title, author, published date, summary and URL per article, plus a continuation token when more pages are available. Examples: stream_id='feed/https://example.com/rss', 'user/{id}/category/global.all', 'user/{id}/tag/global.saved'.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "stream_id",
            FieldKind::String,
            "Stream ID: 'feed/URL' for feeds, 'user/ID/category/label' for categories, 'user/ID/tag/label' for tags",
        ),
        FieldSpec::optional(
            "count",
            FieldKind::Integer,
            "Number of articles to return (1-100, default 20; larger values are capped at 100)",
        )
        .with_default(DefaultValue::Integer(DEFAULT_COUNT))
        .with_constraint(Constraint::Clamp {
            min: 1,
            max: MAX_COUNT,
        }),
        FieldSpec::optional(
            "continuation",
            FieldKind::String,
            "Continuation token from a previous page; omit for the first page",
        ),
        FieldSpec::optional(
            "unread_only",
            FieldKind::Boolean,
            "Only return unread articles (default: true)",
        )
        .with_default(DefaultValue::Boolean(true)),
        FieldSpec::optional(
            "newer_than",
            FieldKind::Integer,
            "Only return articles newer than this timestamp (epoch ms)",
        ),
        FieldSpec::optional(
            "ranked",
            FieldKind::Enum(&["newest", "oldest"]),
            "Sort order: 'newest' or 'oldest'",
        )
        .with_default(DefaultValue::Str("newest")),
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetStreamContentsTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: StreamContentsParams = params.decode()?;
        info!(
            "Fetching {} article(s) from {} (continuation: {})",
            p.count,
            p.stream_id,
            p.continuation.is_some()
        );

        let page = client
            .get_stream_contents(&StreamQuery {
                stream_id: p.stream_id,
                count: p.count,
                ranked: p.ranked,
                unread_only: p.unread_only,
                continuation: p.continuation,
                newer_than: p.newer_than,
            })
            .await?;

        Ok(render::stream_page(&page, params.response_format()))
    }
}
