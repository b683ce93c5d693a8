//! Async HTTP client for the Feedly v3 API.
//!
//! One [`FeedlyClient`] is built at startup and shared by every tool call.
//! The underlying `reqwest::Client` pools connections and is safe to use
//! from many tasks at once. Nothing here retries: a failed call surfaces as a
//! [`FeedlyError`] and the caller decides what to do next.

use reqwest::{
    Client, RequestBuilder, Response, Url,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::FeedlyError;
use super::models::{
    Category, Entry, MarkerAction, MarkerRequest, Profile, StreamPage, Subscription, Tag,
    UnreadCounts,
};
use crate::core::config::FeedlyConfig;

/// Result type for Feedly API calls.
pub type FeedlyResult<T> = Result<T, FeedlyError>;

/// Fixed `User-Agent` identifying this bridge to Feedly.
pub const USER_AGENT: &str = concat!("feedly-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Sort order for stream contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranked {
    #[default]
    Newest,
    Oldest,
}

/// Query for `GET /streams/contents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamQuery {
    pub stream_id: String,
    pub count: u32,
    pub ranked: Ranked,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unread_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_than: Option<i64>,
}

/// Query for `GET /markers/counts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorefresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_than: Option<i64>,
}

/// `GET /entries/{id}` answers with an array, but tolerate a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Entry>),
    One(Box<Entry>),
}

/// Client for the Feedly API.
#[derive(Debug, Clone)]
pub struct FeedlyClient {
    http: Client,
    base_url: Url,
}

impl FeedlyClient {
    /// Build a client from configuration.
    ///
    /// Fails before any networking when the token is blank or the base URL
    /// is unusable.
    pub fn new(config: &FeedlyConfig) -> FeedlyResult<Self> {
        let token = config.access_token.trim();
        if token.is_empty() {
            return Err(FeedlyError::configuration(
                "FEEDLY_ACCESS_TOKEN environment variable not set",
            ));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| FeedlyError::configuration("Invalid access token format"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| FeedlyError::configuration(e.to_string()))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            FeedlyError::configuration(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FeedlyError::configuration(format!(
                "Invalid base URL '{}'",
                config.base_url
            )));
        }

        Ok(Self { http, base_url })
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> FeedlyResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FeedlyError::configuration("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and turn non-2xx statuses into errors.
    async fn send(&self, request: RequestBuilder) -> FeedlyResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = FeedlyError::from_status(status.as_u16(), &body);
        warn!(status = status.as_u16(), "Feedly request rejected: {}", err);
        Err(err)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> FeedlyResult<T> {
        debug!(url = %url, "GET request");
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        url: Url,
        query: &Q,
    ) -> FeedlyResult<T> {
        debug!(url = %url, "GET request with query");
        let response = self.send(self.http.get(url).query(query)).await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> FeedlyResult<T> {
        debug!(url = %url, "POST request");
        let response = self.send(self.http.post(url).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST whose response body (often empty) is ignored.
    async fn post_no_response<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> FeedlyResult<()> {
        debug!(url = %url, "POST request (no response)");
        self.send(self.http.post(url).json(body)).await?;
        Ok(())
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Get the authenticated user's profile.
    pub async fn get_profile(&self) -> FeedlyResult<Profile> {
        self.get(self.endpoint(&["profile"])?).await
    }

    /// List all feed subscriptions.
    pub async fn get_subscriptions(&self) -> FeedlyResult<Vec<Subscription>> {
        self.get(self.endpoint(&["subscriptions"])?).await
    }

    /// List all categories.
    pub async fn get_categories(&self) -> FeedlyResult<Vec<Category>> {
        self.get(self.endpoint(&["categories"])?).await
    }

    /// List all tags.
    pub async fn get_tags(&self) -> FeedlyResult<Vec<Tag>> {
        self.get(self.endpoint(&["tags"])?).await
    }

    /// Get unread counts per stream.
    pub async fn get_unread_counts(&self, query: &UnreadCountsQuery) -> FeedlyResult<UnreadCounts> {
        self.get_with_query(self.endpoint(&["markers", "counts"])?, query)
            .await
    }

    /// Fetch one page of a stream. Pass the previous page's continuation to
    /// get the next one.
    pub async fn get_stream_contents(&self, query: &StreamQuery) -> FeedlyResult<StreamPage> {
        self.get_with_query(self.endpoint(&["streams", "contents"])?, query)
            .await
    }

    /// Get a single entry by id.
    pub async fn get_entry(&self, entry_id: &str) -> FeedlyResult<Entry> {
        let found: OneOrMany = self.get(self.endpoint(&["entries", entry_id])?).await?;
        match found {
            OneOrMany::Many(entries) => entries.into_iter().next().ok_or(FeedlyError::NotFound),
            OneOrMany::One(entry) => Ok(*entry),
        }
    }

    /// Get several entries in one call.
    pub async fn get_entries(&self, entry_ids: &[String]) -> FeedlyResult<Vec<Entry>> {
        self.post(self.endpoint(&["entries", ".mget"])?, entry_ids)
            .await
    }

    // ========================================================================
    // Marker (read state) operations
    // ========================================================================

    async fn mark(&self, request: &MarkerRequest) -> FeedlyResult<()> {
        self.post_no_response(self.endpoint(&["markers"])?, request)
            .await
    }

    /// Mark entries as read.
    pub async fn mark_as_read(&self, entry_ids: &[String]) -> FeedlyResult<()> {
        self.mark(&MarkerRequest::entries(
            MarkerAction::MarkAsRead,
            entry_ids.to_vec(),
        ))
        .await
    }

    /// Mark every entry of a feed as read, optionally only those older than
    /// `as_of` (epoch ms).
    pub async fn mark_feed_as_read(&self, feed_id: &str, as_of: Option<i64>) -> FeedlyResult<()> {
        self.mark(&MarkerRequest::feed(feed_id.to_string(), as_of))
            .await
    }

    /// Mark every entry of a category as read.
    pub async fn mark_category_as_read(
        &self,
        category_id: &str,
        as_of: Option<i64>,
    ) -> FeedlyResult<()> {
        self.mark(&MarkerRequest::category(category_id.to_string(), as_of))
            .await
    }

    /// Undo [`Self::mark_as_read`] for the given entries.
    pub async fn keep_unread(&self, entry_ids: &[String]) -> FeedlyResult<()> {
        self.mark(&MarkerRequest::entries(
            MarkerAction::KeepUnread,
            entry_ids.to_vec(),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{any, body_json, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_url: &str) -> FeedlyConfig {
        FeedlyConfig {
            access_token: "test-token".to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn create_client(server: &MockServer) -> FeedlyClient {
        FeedlyClient::new(&create_config(&server.uri())).unwrap()
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let mut config = create_config("https://cloud.feedly.com/v3");
        config.access_token = "   ".to_string();
        let err = FeedlyClient::new(&config).unwrap_err();
        assert!(matches!(err, FeedlyError::Configuration(_)));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let err = FeedlyClient::new(&create_config("not a url")).unwrap_err();
        assert!(matches!(err, FeedlyError::Configuration(_)));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = FeedlyClient::new(&create_config("https://cloud.feedly.com/v3")).unwrap();
        let url = client.endpoint(&["markers", "counts"]).unwrap();
        assert_eq!(url.as_str(), "https://cloud.feedly.com/v3/markers/counts");

        let client = FeedlyClient::new(&create_config("https://cloud.feedly.com/v3/")).unwrap();
        let url = client.endpoint(&["profile"]).unwrap();
        assert_eq!(url.as_str(), "https://cloud.feedly.com/v3/profile");
    }

    #[test]
    fn test_endpoint_encodes_entry_id() {
        let client = FeedlyClient::new(&create_config("https://cloud.feedly.com/v3")).unwrap();
        let url = client.endpoint(&["entries", "abc/def?x"]).unwrap();
        assert_eq!(url.as_str(), "https://cloud.feedly.com/v3/entries/abc%2Fdef%3Fx");
    }

    #[tokio::test]
    async fn test_requests_carry_token_and_user_agent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("User-Agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "user-1",
                "email": "reader@example.com",
                "fullName": "Ada Reader"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = create_client(&server).get_profile().await.unwrap();
        assert_eq!(profile.id, "user-1");
        assert_eq!(profile.full_name.as_deref(), Some("Ada Reader"));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        for (status, expected) in [
            (401, FeedlyError::Authentication),
            (403, FeedlyError::Forbidden),
            (404, FeedlyError::NotFound),
            (429, FeedlyError::RateLimited),
        ] {
            let server = MockServer::start().await;
            Mock::given(any())
                .respond_with(ResponseTemplate::new(status).set_body_string("ignored"))
                .mount(&server)
                .await;

            let err = create_client(&server).get_tags().await.unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn test_other_status_is_generic() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = create_client(&server).get_categories().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503: maintenance");
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut config = create_config(&server.uri());
        config.timeout = Duration::from_millis(200);
        let client = FeedlyClient::new(&config).unwrap();

        let err = client.get_subscriptions().await.unwrap_err();
        assert_eq!(err, FeedlyError::Timeout);
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = create_client(&server).get_profile().await.unwrap_err();
        assert_eq!(err, FeedlyError::InvalidResponse);
    }

    #[tokio::test]
    async fn test_stream_contents_first_page_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/streams/contents"))
            .and(query_param("streamId", "feed/https://example.com/rss"))
            .and(query_param("count", "20"))
            .and(query_param("ranked", "oldest"))
            .and(query_param("unreadOnly", "true"))
            .and(query_param_is_missing("continuation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "feed/https://example.com/rss",
                "items": [{ "id": "e1", "title": "First" }],
                "continuation": "next-token"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = create_client(&server)
            .get_stream_contents(&StreamQuery {
                stream_id: "feed/https://example.com/rss".to_string(),
                count: 20,
                ranked: Ranked::Oldest,
                unread_only: true,
                continuation: None,
                newer_than: None,
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.continuation.as_deref(), Some("next-token"));
    }

    #[tokio::test]
    async fn test_stream_contents_forwards_continuation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/streams/contents"))
            .and(query_param("continuation", "opaque:123"))
            .and(query_param("newerThan", "1700000000000"))
            .and(query_param_is_missing("unreadOnly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let page = create_client(&server)
            .get_stream_contents(&StreamQuery {
                stream_id: "user/1/category/global.all".to_string(),
                count: 5,
                ranked: Ranked::Newest,
                unread_only: false,
                continuation: Some("opaque:123".to_string()),
                newer_than: Some(1_700_000_000_000),
            })
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert!(page.continuation.is_none());
    }

    #[tokio::test]
    async fn test_get_entry_takes_first_of_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/entries/entry-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": "entry-1", "title": "T" }])),
            )
            .mount(&server)
            .await;

        let entry = create_client(&server).get_entry("entry-1").await.unwrap();
        assert_eq!(entry.title.as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_get_entry_empty_array_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/entries/missing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = create_client(&server).get_entry("missing").await.unwrap_err();
        assert_eq!(err, FeedlyError::NotFound);
    }

    #[tokio::test]
    async fn test_get_entries_posts_id_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/entries/.mget"))
            .and(body_json(json!(["a", "b"])))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": "a" }, { "id": "b" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let entries = create_client(&server)
            .get_entries(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_marker_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/markers"))
            .and(body_json(json!({
                "action": "markAsRead",
                "type": "entries",
                "entryIds": ["a"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/markers"))
            .and(body_json(json!({
                "action": "markAsRead",
                "type": "categories",
                "categoryIds": ["user/1/category/tech"],
                "asOf": 1704067200000_i64
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server);
        assert_ok!(client.mark_as_read(&["a".to_string()]).await);
        assert_ok!(
            client
                .mark_category_as_read("user/1/category/tech", Some(1_704_067_200_000))
                .await
        );
    }

    #[tokio::test]
    async fn test_unread_counts_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markers/counts"))
            .and(query_param("autorefresh", "true"))
            .and(query_param("streamId", "feed/x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "unreadcounts": [{ "id": "feed/x", "count": 3, "updated": 1 }]
            })))
            .mount(&server)
            .await;

        let counts = create_client(&server)
            .get_unread_counts(&UnreadCountsQuery {
                stream_id: Some("feed/x".to_string()),
                autorefresh: Some(true),
                newer_than: None,
            })
            .await
            .unwrap();
        assert_eq!(counts.unreadcounts[0].count, 3);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = FeedlyClient::new(&create_config("http://127.0.0.1:9")).unwrap();
        let result = client.get_profile().await;
        assert_err!(&result);
        assert!(matches!(
            result.unwrap_err(),
            FeedlyError::Connection | FeedlyError::Timeout
        ));
    }
}
