//! Feed and row-store types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category for items published by the compose view and consumed by
/// `announcement_feed` components.
pub const ANNOUNCEMENTS_CATEGORY: &str = "announcements";

/// Default category for `save_form` when the action carries no
/// argument.
pub const SUBMISSIONS_CATEGORY: &str = "submissions";

/// One persisted record at the row-store boundary.
///
/// The payload shape is category-specific: form snapshots for
/// submission categories, feed-item fields for announcement
/// categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Row id (UUID).
    pub id: String,
    /// App identity the row belongs to.
    pub identity: String,
    /// Logical category (table) name.
    pub category: String,
    /// Arbitrary JSON payload.
    pub payload: Value,
    /// Creation time.
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

/// One item of a live content feed, ordered newest-first for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Item id (the backing row id).
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Attachment URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    /// Creation time.
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl FeedItem {
    /// Build a feed item from a stored row.
    ///
    /// Payload extraction is defensive: missing or wrong-typed fields
    /// become empty rather than failing, since rows are authored
    /// externally.
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        let text = |key: &str| {
            row.payload
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let attachments = row
            .payload
            .get("attachments")
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: row.id.clone(),
            title: text("title"),
            message: text("message"),
            attachments,
            created_at: row.created_at,
        }
    }
}

/// A transient notification raised for a feed item that arrived after
/// the watcher mounted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Id of the feed item that raised this notification.
    pub item_id: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the notification auto-dismisses.
    #[serde(with = "crate::utils::datetime")]
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the notification is still showing at `now`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_row_extracts_payload_fields() {
        let row = Row {
            id: "r1".to_string(),
            identity: "Demo".to_string(),
            category: ANNOUNCEMENTS_CATEGORY.to_string(),
            payload: json!({
                "title": "Doors open",
                "message": "See you at 6pm",
                "attachments": ["https://x/a.png", 42],
            }),
            created_at: Utc::now(),
        };
        let item = FeedItem::from_row(&row);
        assert_eq!(item.title, "Doors open");
        assert_eq!(item.message, "See you at 6pm");
        // Non-string attachment entries are dropped, not errors.
        assert_eq!(item.attachments, vec!["https://x/a.png".to_string()]);
    }

    #[test]
    fn from_row_tolerates_foreign_payloads() {
        let row = Row {
            id: "r2".to_string(),
            identity: "Demo".to_string(),
            category: "registrations".to_string(),
            payload: json!({"name": "Ada"}),
            created_at: Utc::now(),
        };
        let item = FeedItem::from_row(&row);
        assert_eq!(item.title, "");
        assert_eq!(item.message, "");
        assert!(item.attachments.is_empty());
    }
}
