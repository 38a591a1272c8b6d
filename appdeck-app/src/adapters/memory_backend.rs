//! In-memory row store with push fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use appdeck_core::types::Row;
use appdeck_core::{channel_key, AppStore, FeedSubscription, RealtimeHub, StoreResult};

/// In-process implementation of both the row store and the realtime
/// hub.
///
/// Every insert fans out to the subscribers of the row's channel, so
/// a feed engine and a compose view wired to the same backend behave
/// like they would against a hosted store with realtime enabled. This
/// is the demo/no-client mode: the interpreter is fully functional
/// with no external services configured.
pub struct MemoryBackend {
    rows: RwLock<Vec<Row>>,
    subscribers: RwLock<HashMap<String, Vec<mpsc::UnboundedSender<Row>>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Shared handle usable as both collaborator traits.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    async fn fan_out(&self, row: &Row) {
        let channel = channel_key(&row.identity, &row.category);
        let mut subscribers = self.subscribers.write().await;
        if let Some(list) = subscribers.get_mut(&channel) {
            // Closed receivers are pruned on the way through.
            list.retain(|tx| tx.send(row.clone()).is_ok());
            if list.is_empty() {
                subscribers.remove(&channel);
            }
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppStore for MemoryBackend {
    async fn insert(
        &self,
        identity: &str,
        category: &str,
        payload: serde_json::Value,
    ) -> StoreResult<Row> {
        let row = Row {
            id: Uuid::new_v4().to_string(),
            identity: identity.to_string(),
            category: category.to_string(),
            payload,
            created_at: Utc::now(),
        };
        self.rows.write().await.push(row.clone());
        log::debug!("memory store insert: {}/{category}/{}", identity, row.id);
        self.fan_out(&row).await;
        Ok(row)
    }

    async fn query(&self, identity: &str, category: &str, limit: u32) -> StoreResult<Vec<Row>> {
        let mut rows: Vec<Row> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.identity == identity && row.category == category)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

#[async_trait]
impl RealtimeHub for MemoryBackend {
    async fn subscribe(&self, channel: &str) -> StoreResult<FeedSubscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .write()
            .await
            .entry(channel.to_string())
            .or_default()
            .push(tx);
        Ok(FeedSubscription::new(channel.to_string(), rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn query_is_scoped_and_newest_first() {
        let backend = MemoryBackend::new();
        backend.insert("A", "notes", json!({"n": 1})).await.unwrap();
        backend.insert("A", "notes", json!({"n": 2})).await.unwrap();
        backend.insert("A", "other", json!({"n": 3})).await.unwrap();
        backend.insert("B", "notes", json!({"n": 4})).await.unwrap();

        let rows = backend.query("A", "notes", 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].created_at >= rows[1].created_at);

        let limited = backend.query("A", "notes", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn inserts_fan_out_to_channel_subscribers() {
        let backend = MemoryBackend::new();
        let mut sub = backend.subscribe(&channel_key("A", "notes")).await.unwrap();

        backend.insert("A", "notes", json!({"n": 1})).await.unwrap();
        backend.insert("B", "notes", json!({"n": 2})).await.unwrap();

        let delivered = sub.try_next().expect("row delivered");
        assert_eq!(delivered.payload["n"], 1);
        // The other identity's insert went to a different channel.
        assert!(sub.try_next().is_none());
    }

    #[tokio::test]
    async fn dropped_subscribers_are_pruned() {
        let backend = MemoryBackend::new();
        let sub = backend.subscribe(&channel_key("A", "notes")).await.unwrap();
        drop(sub);

        backend.insert("A", "notes", json!({"n": 1})).await.unwrap();
        assert!(backend.subscribers.read().await.is_empty());
    }
}
