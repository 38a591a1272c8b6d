//! Realtime feed engine.
//!
//! One engine per mounted `announcement_feed` (or compose view),
//! scoped by app identity and category. Lifecycle is
//! `Idle -> Subscribed -> Idle`: [`FeedEngine::mount`] does the bulk
//! fetch and opens the push subscription, [`FeedEngine::pump`] drains
//! pushed rows into the ordered feed, [`FeedEngine::unmount`] drops
//! the subscription. Push callbacks never run as implicit control
//! flow — rows queue in the subscription's inbox and are applied
//! synchronously on pump.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::services::RuntimeContext;
use crate::traits::{channel_key, FeedSubscription};
use crate::types::{FeedItem, Notification, Row};

/// Snapshot of a feed for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    /// Items, newest first.
    pub items: Vec<FeedItem>,
    /// Currently active notifications.
    pub notifications: Vec<Notification>,
    /// Error banner text, if the initial fetch or subscribe failed.
    pub error: Option<String>,
    /// Whether a push subscription is open.
    pub live: bool,
}

enum FeedPhase {
    Idle,
    Subscribed(FeedSubscription),
}

struct FeedState {
    phase: FeedPhase,
    items: Vec<FeedItem>,
    seen: HashSet<String>,
    notifications: Vec<Notification>,
    mounted_at: Option<DateTime<Utc>>,
    mount_epoch: u64,
    last_error: Option<String>,
}

/// Ordered, deduplicated live feed over one (identity, category) pair.
pub struct FeedEngine {
    ctx: Arc<RuntimeContext>,
    category: String,
    state: Mutex<FeedState>,
}

impl FeedEngine {
    /// Create an idle engine for a category, scoped to the context's
    /// current identity at mount time.
    #[must_use]
    pub fn new(ctx: Arc<RuntimeContext>, category: &str) -> Self {
        Self {
            ctx,
            category: category.to_string(),
            state: Mutex::new(FeedState {
                phase: FeedPhase::Idle,
                items: Vec::new(),
                seen: HashSet::new(),
                notifications: Vec::new(),
                mounted_at: None,
                mount_epoch: 0,
                last_error: None,
            }),
        }
    }

    /// The category this engine reads.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Bulk-fetch existing items and open the push subscription.
    ///
    /// Fetch and subscribe failures do not propagate — they surface as
    /// the view's error banner, and the rest of the screen keeps
    /// working. Items already present are discarded; mounting is a
    /// fresh start for the current identity.
    pub async fn mount(&self) {
        let identity = self.ctx.identity().await;
        let mut state = self.state.lock().await;
        state.items.clear();
        state.seen.clear();
        state.notifications.clear();
        state.last_error = None;
        state.mount_epoch = self.ctx.epoch();
        state.mounted_at = Some(Utc::now());

        match self
            .ctx
            .app_store()
            .query(&identity, &self.category, self.ctx.options().feed_page_size)
            .await
        {
            Ok(rows) => {
                for row in &rows {
                    let item = FeedItem::from_row(row);
                    if state.seen.insert(item.id.clone()) {
                        insert_sorted(&mut state.items, item);
                    }
                }
            }
            Err(e) => {
                log::warn!("feed fetch failed for {identity}/{}: {e}", self.category);
                state.last_error = Some(e.to_string());
            }
        }

        let channel = channel_key(&identity, &self.category);
        match self.ctx.realtime().subscribe(&channel).await {
            Ok(subscription) => state.phase = FeedPhase::Subscribed(subscription),
            Err(e) => {
                log::warn!("feed subscribe failed for {channel}: {e}");
                state.last_error = Some(e.to_string());
                state.phase = FeedPhase::Idle;
            }
        }
    }

    /// Drain pending push events into the feed.
    ///
    /// Returns how many new items were applied. Events are applied in
    /// delivery order but inserted at their timestamp position, so the
    /// feed stays sorted newest-first even when the transport delivers
    /// out of order. An engine whose mount epoch has gone stale drops
    /// its subscription instead of applying rows to a foreign app.
    pub async fn pump(&self) -> usize {
        let mut state = self.state.lock().await;

        if !self.ctx.is_current(state.mount_epoch) {
            if matches!(state.phase, FeedPhase::Subscribed(_)) {
                log::debug!("feed for {} went stale; unsubscribing", self.category);
                state.phase = FeedPhase::Idle;
            }
            return 0;
        }

        let mut drained = Vec::new();
        if let FeedPhase::Subscribed(subscription) = &mut state.phase {
            while let Some(row) = subscription.try_next() {
                drained.push(row);
            }
        }

        let mut applied = 0;
        for row in drained {
            if self.apply(&mut state, &row) {
                applied += 1;
            }
        }

        let now = Utc::now();
        state.notifications.retain(|n| n.is_active(now));
        applied
    }

    fn apply(&self, state: &mut FeedState, row: &Row) -> bool {
        let item = FeedItem::from_row(row);
        if !state.seen.insert(item.id.clone()) {
            return false;
        }

        // Notify only for items created after the watcher mounted;
        // anything older is backfill and would storm on initial load.
        let fresh = state
            .mounted_at
            .is_some_and(|mounted_at| item.created_at > mounted_at);
        if fresh {
            state.notifications.push(Notification {
                item_id: item.id.clone(),
                title: item.title.clone(),
                message: item.message.clone(),
                expires_at: Utc::now() + self.ctx.options().notification_ttl,
            });
        }

        insert_sorted(&mut state.items, item);
        true
    }

    /// Drop the push subscription.
    ///
    /// Mandatory when the hosting screen or app identity changes, so a
    /// subscription bound to a stale identity cannot leak.
    pub async fn unmount(&self) {
        let mut state = self.state.lock().await;
        state.phase = FeedPhase::Idle;
        state.mounted_at = None;
    }

    /// Current feed snapshot for rendering.
    pub async fn view(&self) -> FeedView {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        state.notifications.retain(|n| n.is_active(now));
        FeedView {
            items: state.items.clone(),
            notifications: state.notifications.clone(),
            error: state.last_error.clone(),
            live: matches!(state.phase, FeedPhase::Subscribed(_)),
        }
    }
}

/// Insert keeping newest-first order; ties keep earlier arrivals first.
fn insert_sorted(items: &mut Vec<FeedItem>, item: FeedItem) {
    let position = items
        .iter()
        .position(|existing| existing.created_at < item.created_at)
        .unwrap_or(items.len());
    items.insert(position, item);
}
