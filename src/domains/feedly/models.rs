//! Typed views over Feedly API payloads.
//!
//! Fields are read from Feedly's camelCase JSON and written back out in
//! snake_case, which is the normalized form returned to agents in `json`
//! mode. Every field is optional or defaulted so an upstream that omits a
//! key never fails decoding. Profiles and entries keep any other upstream
//! fields verbatim in `extra`; the remaining models drop them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user's profile (`GET /profile`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub locale: Option<String>,
    pub login: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A category (folder) a user files subscriptions under.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Category {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
}

/// A user-defined or global tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Tag {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl Tag {
    /// Label to show, falling back to the last segment of the tag id.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => self.id.rsplit('/').next().unwrap_or(&self.id),
        }
    }
}

/// A feed subscription (`GET /subscriptions`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Subscription {
    pub id: String,
    pub title: Option<String>,
    pub website: Option<String>,
    pub categories: Vec<Category>,
    pub subscribers: Option<u64>,
    pub updated: Option<i64>,
}

/// Response of `GET /markers/counts`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UnreadCounts {
    pub unreadcounts: Vec<UnreadCount>,
}

/// Unread count for one stream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct UnreadCount {
    pub id: String,
    pub count: u64,
    pub updated: Option<i64>,
}

/// One page of `GET /streams/contents`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct StreamPage {
    pub id: Option<String>,
    pub items: Vec<Entry>,
    pub continuation: Option<String>,
}

/// A single article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Entry {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published: Option<i64>,
    pub unread: bool,
    pub origin: Option<Origin>,
    pub alternate: Vec<Link>,
    pub canonical_url: Option<String>,
    pub summary: Option<TextBody>,
    pub content: Option<TextBody>,
    pub full_content: Option<String>,
    pub keywords: Vec<String>,
    /// Upstream fields without a typed counterpart (tags, visual, engagement...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The feed an entry came from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Origin {
    pub stream_id: Option<String>,
    pub title: Option<String>,
    pub html_url: Option<String>,
}

/// An alternate link of an entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    #[serde(rename(deserialize = "type"))]
    pub mime_type: Option<String>,
}

/// HTML body wrapper used for `summary` and `content`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextBody {
    pub content: Option<String>,
    pub direction: Option<String>,
}

impl Entry {
    /// The article URL: first alternate link, then the canonical URL.
    pub fn url(&self) -> Option<&str> {
        self.alternate
            .first()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
            .or(self.canonical_url.as_deref())
    }

    /// Best available body: full content, then content, then summary.
    pub fn body(&self) -> Option<&str> {
        fn non_empty(text: Option<&str>) -> Option<&str> {
            text.filter(|t| !t.is_empty())
        }

        non_empty(self.full_content.as_deref())
            .or_else(|| non_empty(self.content.as_ref().and_then(|c| c.content.as_deref())))
            .or_else(|| non_empty(self.summary.as_ref().and_then(|s| s.content.as_deref())))
    }
}

/// Marker action sent to `POST /markers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerAction {
    #[serde(rename = "markAsRead")]
    MarkAsRead,
    #[serde(rename = "keepUnread")]
    KeepUnread,
}

/// What a marker request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTarget {
    Entries,
    Feeds,
    Categories,
}

/// Body of `POST /markers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRequest {
    pub action: MarkerAction,
    #[serde(rename = "type")]
    pub target: MarkerTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<i64>,
}

impl MarkerRequest {
    /// Request targeting individual entries.
    pub fn entries(action: MarkerAction, entry_ids: Vec<String>) -> Self {
        Self {
            action,
            target: MarkerTarget::Entries,
            entry_ids: Some(entry_ids),
            feed_ids: None,
            category_ids: None,
            as_of: None,
        }
    }

    /// Mark a whole feed as read.
    pub fn feed(feed_id: String, as_of: Option<i64>) -> Self {
        Self {
            action: MarkerAction::MarkAsRead,
            target: MarkerTarget::Feeds,
            entry_ids: None,
            feed_ids: Some(vec![feed_id]),
            category_ids: None,
            as_of,
        }
    }

    /// Mark a whole category as read.
    pub fn category(category_id: String, as_of: Option<i64>) -> Self {
        Self {
            action: MarkerAction::MarkAsRead,
            target: MarkerTarget::Categories,
            entry_ids: None,
            feed_ids: None,
            category_ids: Some(vec![category_id]),
            as_of,
        }
    }
}
