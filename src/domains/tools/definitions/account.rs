//! Profile tool.
//!
//! The profile carries the user id needed to build category and tag stream
//! ids such as `user/{userId}/category/Tech`.

use tracing::{info, instrument};

use super::ToolDefinition;
use crate::domains::feedly::FeedlyClient;
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::SideEffect;
use crate::domains::tools::render::{self, Envelope};
use crate::domains::tools::schema::{FieldSpec, ParamSet, RESPONSE_FORMAT};

/// Get the authenticated user's profile.
pub struct GetProfileTool;

impl ToolDefinition for GetProfileTool {
    const NAME: &'static str = "feedly_get_profile";
    const TITLE: &'static str = "Get User Profile";
    const DESCRIPTION: &'static str = "Get Feedly user profile information including the user ID. Use this to verify authentication and to build stream IDs like 'user/{userId}/category/Tech'.";
    const FIELDS: &'static [FieldSpec] = &[RESPONSE_FORMAT];
    const SIDE_EFFECT: SideEffect = SideEffect::ReadOnly;
}

impl GetProfileTool {
    #[instrument(skip_all)]
    pub async fn execute(client: &FeedlyClient, params: &ParamSet) -> Result<Envelope, ToolError> {
        info!("Fetching profile");
        let profile = client.get_profile().await?;
        Ok(render::profile(&profile, params.response_format()))
    }
}
