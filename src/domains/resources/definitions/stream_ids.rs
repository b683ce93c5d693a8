//! Stream id guide resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Guide to Feedly stream identifiers (static Markdown).
pub struct StreamIdsDocResource;

impl ResourceDefinition for StreamIdsDocResource {
    const URI: &'static str = "feedly://docs/stream-ids";
    const NAME: &'static str = "Feedly Stream IDs";
    const DESCRIPTION: &'static str =
        "How to build the stream IDs accepted by the stream and marker tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Feedly Stream IDs

Every source of articles in Feedly is a *stream*, addressed by an opaque id.

| Stream | Format | Example |
|---|---|---|
| Feed | `feed/{url}` | `feed/https://example.com/rss` |
| Category | `user/{userId}/category/{label}` | `user/abc123/category/Tech` |
| Tag | `user/{userId}/tag/{label}` | `user/abc123/tag/Research` |
| All articles | `user/{userId}/category/global.all` | |
| Saved for later | `user/{userId}/tag/global.saved` | |

Get `userId` from `feedly_get_profile`. Feed ids come from
`feedly_get_subscriptions`, category ids from `feedly_get_categories` and tag
ids from `feedly_get_tags`.

## Paging

`feedly_get_stream_contents` returns at most 100 articles per call. When more
are available the response carries a `continuation` token; pass it back
unchanged to fetch the next page. Omit it (or pass an empty string) to start
from the first page.

## Read state

- `feedly_mark_as_read` / `feedly_keep_unread` take entry ids and undo each other.
- `feedly_mark_feed_as_read` and `feedly_mark_category_as_read` take a stream id
  and an optional `as_of` timestamp in epoch milliseconds.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_ids_metadata() {
        assert_eq!(StreamIdsDocResource::URI, "feedly://docs/stream-ids");
        assert_eq!(StreamIdsDocResource::MIME_TYPE, "text/markdown");
    }

    #[test]
    fn test_stream_ids_content() {
        match StreamIdsDocResource::content() {
            ResourceContent::Text(text) => {
                assert!(text.contains("feed/https://example.com/rss"));
                assert!(text.contains("global.saved"));
                assert!(text.contains("continuation"));
            }
            _ => panic!("Expected Text content"),
        }
    }
}
