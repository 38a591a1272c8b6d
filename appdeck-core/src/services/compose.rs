//! Compose/admin counterpart.
//!
//! Consumes the same app configuration as the renderer, but in the
//! other direction: it translates captured data back through the
//! author's labels, and it publishes feed items instead of reading
//! them.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::CoreResult;
use crate::services::RuntimeContext;
use crate::types::{AppConfig, Component, FeedItem, Row, ANNOUNCEMENTS_CATEGORY};

/// One payload entry translated through the field-label map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledField {
    /// Field id as stored.
    pub id: String,
    /// Human label the author configured, or the raw id when no label
    /// was ever declared.
    pub label: String,
    /// Stored value.
    pub value: Value,
}

/// One captured form snapshot, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Backing row id.
    pub id: String,
    /// Submission time (RFC3339).
    pub created_at: String,
    /// Labeled payload entries.
    pub fields: Vec<LabeledField>,
}

/// Admin-side consumer of an app configuration.
pub struct ComposeService {
    ctx: Arc<RuntimeContext>,
}

impl ComposeService {
    /// Create a compose service.
    #[must_use]
    pub fn new(ctx: Arc<RuntimeContext>) -> Self {
        Self { ctx }
    }

    /// Build the field id → label map for a configuration.
    ///
    /// One recursive traversal over all screens in document order; the
    /// first non-empty label or title per id wins and later duplicates
    /// are ignored, so the result is deterministic for a fixed config.
    #[must_use]
    pub fn field_labels(config: &AppConfig) -> HashMap<String, String> {
        let mut labels = HashMap::new();
        for screen in &config.screens {
            for component in &screen.components {
                collect_labels(component, &mut labels);
            }
        }
        labels
    }

    /// List captured submissions for a category, newest first, with
    /// payload keys translated through the label map.
    pub async fn list_submissions(
        &self,
        config: &AppConfig,
        category: &str,
    ) -> CoreResult<Vec<Submission>> {
        let labels = Self::field_labels(config);
        let identity = self.ctx.identity().await;
        let rows = self
            .ctx
            .app_store()
            .query(&identity, category, self.ctx.options().feed_page_size)
            .await?;
        Ok(rows.iter().map(|row| label_row(row, &labels)).collect())
    }

    /// Fetch several categories concurrently.
    ///
    /// Returns one `(category, submissions)` pair per requested
    /// category, in request order.
    pub async fn inbox(
        &self,
        config: &AppConfig,
        categories: &[&str],
    ) -> CoreResult<Vec<(String, Vec<Submission>)>> {
        let fetches = categories
            .iter()
            .map(|category| self.list_submissions(config, category));
        let results = join_all(fetches).await;

        let mut inbox = Vec::with_capacity(categories.len());
        for (category, result) in categories.iter().zip(results) {
            inbox.push(((*category).to_string(), result?));
        }
        Ok(inbox)
    }

    /// Publish a feed item under the announcements category.
    ///
    /// The dual of the feed engine's consumption: subscribers on the
    /// same identity see the insert as a push event.
    pub async fn publish(
        &self,
        title: &str,
        message: &str,
        attachments: &[String],
    ) -> CoreResult<FeedItem> {
        let identity = self.ctx.identity().await;
        let payload = json!({
            "title": title,
            "message": message,
            "attachments": attachments,
        });
        let row = self
            .ctx
            .app_store()
            .insert(&identity, ANNOUNCEMENTS_CATEGORY, payload)
            .await?;
        Ok(FeedItem::from_row(&row))
    }
}

fn collect_labels(component: &Component, labels: &mut HashMap<String, String>) {
    if let (Some(id), Some(label)) = (component.id(), component.label()) {
        labels
            .entry(id.to_string())
            .or_insert_with(|| label.to_string());
    }
    for child in component.children() {
        collect_labels(child, labels);
    }
}

fn label_row(row: &Row, labels: &HashMap<String, String>) -> Submission {
    let fields = row
        .payload
        .as_object()
        .map(|payload| {
            payload
                .iter()
                .map(|(id, value)| LabeledField {
                    id: id.clone(),
                    label: labels.get(id).cloned().unwrap_or_else(|| id.clone()),
                    value: value.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    Submission {
        id: row.id.clone(),
        created_at: row.created_at.to_rfc3339(),
        fields,
    }
}
