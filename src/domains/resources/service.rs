//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! It maintains a registry of available resources and handles read requests.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use std::collections::BTreeMap;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::definitions::ServerSummary;
use super::error::ResourceError;
use super::registry::get_all_resources;

/// Service for managing and accessing resources.
///
/// This service maintains a registry of available resources and handles
/// resource listing and reading operations.
pub struct ResourceService {
    /// Snapshot served by the server info resource.
    server_info: ServerSummary,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content computed on read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy)]
pub enum DynamicResourceType {
    /// Running server and upstream settings.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService serving `server_info`.
    pub fn new(server_info: ServerSummary) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            server_info,
            resources: BTreeMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::text(text, uri),
            ResourceContent::Dynamic(dynamic_type) => {
                self.resolve_dynamic_content(uri, *dynamic_type)?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Resolve dynamic resource content.
    fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        match dynamic_type {
            DynamicResourceType::ServerInfo => Ok(ResourceContents::text(
                serde_json::to_string_pretty(&self.server_info)
                    .map_err(|e| ResourceError::internal(e.to_string()))?,
                uri,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    fn create_service() -> ResourceService {
        let mut config = Config::new();
        config.feedly.access_token = "secret-token".to_string();
        ResourceService::new(ServerSummary::from_config(&config))
    }

    fn text_of(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("Expected text contents, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resource_service_creation() {
        let service = create_service();

        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 2);
    }

    #[tokio::test]
    async fn test_read_stream_ids_doc() {
        let service = create_service();

        let result = service.read_resource("feedly://docs/stream-ids").await.unwrap();
        assert!(text_of(&result).starts_with("# Feedly Stream IDs"));
    }

    #[tokio::test]
    async fn test_read_server_info() {
        let service = create_service();

        let result = service.read_resource("feedly://server/info").await.unwrap();
        let info: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(info["name"], "feedly-mcp-server");
        assert_eq!(info["api_base_url"], "https://cloud.feedly.com/v3");
        assert_eq!(info["timeout_secs"], 30);
        assert!(!text_of(&result).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = create_service();

        let result = service.read_resource("feedly://server/nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
