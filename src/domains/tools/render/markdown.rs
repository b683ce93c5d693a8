//! Markdown formatters.
//!
//! Output is deterministic: fixed field order, one heading or bullet per
//! item, and an explicit message instead of an empty body.

use chrono::{DateTime, Utc};

use super::MarkerReceipt;
use crate::domains::feedly::models::{
    Category, Entry, MarkerAction, MarkerTarget, Profile, StreamPage, Subscription, Tag,
    UnreadCount,
};

/// Summary length for articles listed without their full body.
const SUMMARY_LENGTH: usize = 300;

const NOT_AVAILABLE: &str = "Not available";

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM` (UTC).
fn format_timestamp(timestamp_ms: Option<i64>) -> String {
    timestamp_ms
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Readable name and kind of a stream id, for display only.
fn stream_kind(stream_id: &str) -> (&str, &'static str) {
    if let Some((_, label)) = stream_id.split_once("/category/") {
        (label, "Category")
    } else if let Some((_, label)) = stream_id.split_once("/tag/") {
        (label, "Tag")
    } else if let Some(url) = stream_id.strip_prefix("feed/") {
        (url, "Feed")
    } else {
        (stream_id, "Stream")
    }
}

fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length - 3).collect();
    format!("{}...", cut)
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

pub(super) fn profile(profile: &Profile) -> String {
    let name = profile
        .full_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .or(profile.given_name.as_deref());

    let id = if profile.id.is_empty() {
        "Unknown"
    } else {
        profile.id.as_str()
    };

    [
        "## Feedly Profile".to_string(),
        String::new(),
        format!("**User ID:** `{}`", id),
        format!("**Email:** {}", or_na(profile.email.as_deref())),
        format!("**Name:** {}", or_na(name)),
        format!("**Locale:** {}", or_na(profile.locale.as_deref())),
        format!("**Login:** {}", or_na(profile.login.as_deref())),
    ]
    .join("\n")
}

pub(super) fn subscriptions(subscriptions: &[Subscription]) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions found.".to_string();
    }

    let mut lines = vec![format!("## Subscriptions ({} feeds)\n", subscriptions.len())];
    for sub in subscriptions {
        let labels: Vec<&str> = sub
            .categories
            .iter()
            .filter_map(|c| c.label.as_deref())
            .collect();

        lines.push(format!("### {}", sub.title.as_deref().unwrap_or("Untitled")));
        lines.push(format!("**Feed ID:** `{}`", sub.id));
        if let Some(website) = sub.website.as_deref().filter(|w| !w.is_empty()) {
            lines.push(format!("**Website:** [{}]({})", website, website));
        }
        lines.push(format!(
            "**Categories:** {}",
            if labels.is_empty() {
                "Uncategorized".to_string()
            } else {
                labels.join(", ")
            }
        ));
        lines.push(String::new());
    }
    lines.join("\n")
}

pub(super) fn categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut lines = vec![format!("## Categories ({} found)\n", categories.len())];
    for cat in categories {
        lines.push(format!("- **{}**", cat.label.as_deref().unwrap_or("Unlabeled")));
        lines.push(format!("  - ID: `{}`", cat.id));
    }
    lines.join("\n")
}

pub(super) fn tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags found.".to_string();
    }

    let mut lines = vec![format!("## Tags ({} found)\n", tags.len())];
    for tag in tags {
        lines.push(format!("- **{}**", tag.display_label()));
        lines.push(format!("  - ID: `{}`", tag.id));
    }
    lines.join("\n")
}

/// Sorted by count, highest first; ties keep upstream order.
pub(super) fn unread_counts(counts: &[UnreadCount]) -> String {
    if counts.is_empty() {
        return "No unread counts available.".to_string();
    }

    let mut sorted: Vec<&UnreadCount> = counts.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let mut lines = vec!["## Unread Counts\n".to_string()];
    for item in sorted {
        let (name, kind) = stream_kind(&item.id);
        lines.push(format!(
            "- **{}** ({}): {} unread | ID: `{}` | updated: {}",
            name,
            kind,
            item.count,
            item.id,
            format_timestamp(item.updated)
        ));
    }
    lines.join("\n")
}

pub(super) fn entry(entry: &Entry, include_content: bool) -> String {
    let mut lines = vec![
        format!("### {}", entry.title.as_deref().unwrap_or("Untitled")),
        format!(
            "**Author:** {} | **Published:** {} | **Unread:** {}",
            entry.author.as_deref().unwrap_or("Unknown author"),
            format_timestamp(entry.published),
            if entry.unread { "Yes" } else { "No" }
        ),
    ];

    if let Some(origin) = &entry.origin {
        let title = origin.title.as_deref().unwrap_or("Unknown source");
        match origin.stream_id.as_deref() {
            Some(stream_id) => lines.push(format!("**Source:** {} (`{}`)", title, stream_id)),
            None => lines.push(format!("**Source:** {}", title)),
        }
    }

    lines.push(format!("**ID:** `{}`", entry.id));
    if let Some(url) = entry.url() {
        lines.push(format!("**URL:** [{}]({})", url, url));
    }

    match entry.body() {
        Some(body) if include_content => lines.push(format!("\n**Content:**\n{}", body)),
        Some(body) => lines.push(format!(
            "\n**Summary:** {}",
            truncate_text(body, SUMMARY_LENGTH)
        )),
        None => {}
    }

    lines.join("\n")
}

pub(super) fn entries(entries: &[Entry], include_content: bool) -> String {
    if entries.is_empty() {
        return "No articles found.".to_string();
    }
    entries
        .iter()
        .map(|e| entry(e, include_content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

pub(super) fn stream_page(page: &StreamPage) -> String {
    let mut out = format!(
        "## Articles ({} found)\n\n{}",
        page.items.len(),
        entries(&page.items, false)
    );

    if let Some(continuation) = page.continuation.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(&format!(
            "\n\n---\n**More articles available.** Use continuation token: `{}`",
            continuation
        ));
    }
    out
}

pub(super) fn receipt(receipt: &MarkerReceipt) -> String {
    let as_of = receipt
        .as_of
        .map(|ts| format!(" (entries before {})", format_timestamp(Some(ts))))
        .unwrap_or_default();
    let ids = receipt.ids.join(", ");

    match (receipt.action, receipt.target) {
        (MarkerAction::MarkAsRead, MarkerTarget::Entries) => format!(
            "Successfully marked {} article(s) as read.",
            receipt.ids.len()
        ),
        (MarkerAction::KeepUnread, MarkerTarget::Entries) => format!(
            "Successfully kept {} article(s) as unread.",
            receipt.ids.len()
        ),
        (MarkerAction::MarkAsRead, MarkerTarget::Feeds) => {
            format!("Successfully marked feed as read: {}{}", ids, as_of)
        }
        (MarkerAction::MarkAsRead, MarkerTarget::Categories) => {
            format!("Successfully marked category as read: {}{}", ids, as_of)
        }
        (MarkerAction::KeepUnread, _) => format!("Successfully kept as unread: {}", ids),
    }
}
