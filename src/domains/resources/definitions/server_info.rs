//! Server info resource definition.

use serde::Serialize;

use super::ResourceDefinition;
use crate::core::config::Config;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "feedly://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "Server name, version and the Feedly API endpoint this server talks to";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

/// Snapshot of the running configuration. The access token is never included.
#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    pub name: String,
    pub version: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl ServerSummary {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            api_base_url: config.feedly.base_url.clone(),
            timeout_secs: config.feedly.timeout.as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "feedly://server/info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_server_info_omits_token() {
        let mut config = Config::new();
        config.feedly.access_token = "secret-token".to_string();

        let json = serde_json::to_string(&ServerSummary::from_config(&config)).unwrap();
        assert!(json.contains("api_base_url"));
        assert!(!json.contains("secret-token"));
    }
}
