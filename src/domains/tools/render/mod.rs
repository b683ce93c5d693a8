//! Response rendering.
//!
//! Turns typed Feedly payloads into an [`Envelope`] in either output mode.
//! `json` serializes the normalized models; `markdown` goes through the
//! formatters in `markdown.rs`. Rendering never touches the network and never
//! fails: every well-formed payload, including empty ones, has an output.

mod markdown;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domains::feedly::models::{
    Category, Entry, MarkerAction, MarkerTarget, Profile, StreamPage, Subscription, Tag,
    UnreadCount,
};

/// Maximum size of a rendered body, in characters.
pub const CHARACTER_LIMIT: usize = 25_000;

const TRUNCATION_NOTICE: &str = "\n\n... [Response truncated at 25000 characters]";

/// Output encoding requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Json,
}

/// A rendered tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub format: ResponseFormat,
    pub body: String,
}

impl Envelope {
    /// Wrap a body, truncating it to [`CHARACTER_LIMIT`].
    pub fn new(format: ResponseFormat, body: String) -> Self {
        Self {
            format,
            body: truncate_response(body),
        }
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        let body = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            warn!("Failed to serialize response: {}", e);
            "{}".to_string()
        });
        Self::new(ResponseFormat::Json, body)
    }

    fn markdown(body: String) -> Self {
        Self::new(ResponseFormat::Markdown, body)
    }
}

/// Cut an oversized body and append a notice.
pub fn truncate_response(body: String) -> String {
    if body.chars().count() <= CHARACTER_LIMIT {
        return body;
    }
    let keep = CHARACTER_LIMIT - TRUNCATION_NOTICE.chars().count();
    let mut out: String = body.chars().take(keep).collect();
    out.push_str(TRUNCATION_NOTICE);
    out
}

/// Outcome of a read-state change, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerReceipt {
    pub action: MarkerAction,
    pub target: MarkerTarget,
    pub ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<i64>,
}

#[derive(Serialize)]
struct StreamPageView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_id: Option<&'a str>,
    items: &'a [Entry],
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    continuation: Option<&'a str>,
}

#[derive(Serialize)]
struct UnreadCountsView<'a> {
    unreadcounts: &'a [UnreadCount],
}

pub fn profile(profile: &Profile, format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(profile),
        ResponseFormat::Markdown => Envelope::markdown(markdown::profile(profile)),
    }
}

pub fn subscriptions(subscriptions: &[Subscription], format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(subscriptions),
        ResponseFormat::Markdown => Envelope::markdown(markdown::subscriptions(subscriptions)),
    }
}

pub fn categories(categories: &[Category], format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(categories),
        ResponseFormat::Markdown => Envelope::markdown(markdown::categories(categories)),
    }
}

pub fn tags(tags: &[Tag], format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(tags),
        ResponseFormat::Markdown => Envelope::markdown(markdown::tags(tags)),
    }
}

pub fn unread_counts(counts: &[UnreadCount], format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(&UnreadCountsView {
            unreadcounts: counts,
        }),
        ResponseFormat::Markdown => Envelope::markdown(markdown::unread_counts(counts)),
    }
}

pub fn stream_page(page: &StreamPage, format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(&StreamPageView {
            stream_id: page.id.as_deref(),
            items: &page.items,
            count: page.items.len(),
            continuation: page.continuation.as_deref().filter(|c| !c.is_empty()),
        }),
        ResponseFormat::Markdown => Envelope::markdown(markdown::stream_page(page)),
    }
}

/// A single article, with its full body in markdown mode.
pub fn entry(entry: &Entry, format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(entry),
        ResponseFormat::Markdown => Envelope::markdown(markdown::entry(entry, true)),
    }
}

/// Several articles, with full bodies in markdown mode.
pub fn entries(entries: &[Entry], format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(entries),
        ResponseFormat::Markdown => Envelope::markdown(markdown::entries(entries, true)),
    }
}

pub fn receipt(receipt: &MarkerReceipt, format: ResponseFormat) -> Envelope {
    match format {
        ResponseFormat::Json => Envelope::json(receipt),
        ResponseFormat::Markdown => Envelope::markdown(markdown::receipt(receipt)),
    }
}
