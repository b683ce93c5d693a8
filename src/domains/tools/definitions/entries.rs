//! Article lookup tools.

use serde::Deserialize;
use tracing::{info, instrument};

use super::ToolDefinition;
use crate::domains::feedly::FeedlyClient;
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::SideEffect;
use crate::domains::tools::render::{self, Envelope};
use crate::domains::tools::schema::{
    FieldKind, FieldSpec, ParamSet, RESPONSE_FORMAT, entry_ids,
};

#[derive(Debug, Deserialize)]
struct EntryParams {
    entry_id: String,
}

#[derive(Debug, Deserialize)]
struct EntriesParams {
    entry_ids: Vec<String>,
}

/// Get one article with its full content.
pub struct GetEntryTool;

impl ToolDefinition for GetEntryTool {
    const NAME: &'static str = "feedly_get_entry";
    const TITLE: &'static str = "Get Article Details";
    const DESCRIPTION: &'static str = "Get full details for a single article by its entry ID: title, author, published date, source, URL and complete content.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("entry_id", FieldKind::String, "Unique entry/article ID"),
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetEntryTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: EntryParams = params.decode()?;
        info!("Fetching entry {}", p.entry_id);
        let entry = client.get_entry(&p.entry_id).await?;
        Ok(render::entry(&entry, params.response_format()))
    }
}

/// Get several articles in one call.
pub struct GetEntriesTool;

impl ToolDefinition for GetEntriesTool {
    const NAME: &'static str = "feedly_get_entries";
    const TITLE: &'static str = "Get Multiple Articles";
    const DESCRIPTION: &'static str = "Get full details for multiple articles by their entry IDs (max 1000) in a single request.";
    const FIELDS: &'static [FieldSpec] = &[
        entry_ids("List of entry IDs to fetch (1-1000)"),
        RESPONSE_FORMAT,
    ];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetEntriesTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        let p: EntriesParams = params.decode()?;
        let entries = client.get_entries(&p.entry_ids).await?;
        info!(
            "Fetched {} of {} requested entr(ies)",
            entries.len(),
            p.entry_ids.len()
        );
        Ok(render::entries(&entries, params.response_format()))
    }
}
