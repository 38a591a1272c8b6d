//! Realtime push-channel abstraction.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::StoreResult;
use crate::types::Row;

/// Derives the push-channel key for an identity/category pair.
///
/// Deterministic so that the feed engine and the compose counterpart
/// land on the same channel without coordination.
#[must_use]
pub fn channel_key(identity: &str, category: &str) -> String {
    format!("{identity}::{category}")
}

/// A live subscription to one push channel.
///
/// Inserted rows are delivered in transport order. Dropping the
/// subscription unsubscribes; the publisher observes the closed
/// receiver and prunes it.
pub struct FeedSubscription {
    channel: String,
    rx: mpsc::UnboundedReceiver<Row>,
}

impl FeedSubscription {
    /// Wrap a receiver end as a subscription.
    #[must_use]
    pub fn new(channel: String, rx: mpsc::UnboundedReceiver<Row>) -> Self {
        Self { channel, rx }
    }

    /// The channel key this subscription is bound to.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Pull the next pending row without waiting.
    ///
    /// Returns `None` when the inbox is currently empty or the
    /// publisher side has gone away.
    pub fn try_next(&mut self) -> Option<Row> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next pushed row.
    ///
    /// Returns `None` once the publisher side has closed.
    pub async fn next(&mut self) -> Option<Row> {
        self.rx.recv().await
    }
}

impl std::fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSubscription")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

/// Realtime collaborator.
///
/// Hands out per-channel subscriptions fed by external inserts. The
/// transport guarantees per-channel ordering only; ordering across
/// channels is unspecified.
#[async_trait]
pub trait RealtimeHub: Send + Sync {
    /// Open a subscription to a channel key (see [`channel_key`]).
    async fn subscribe(&self, channel: &str) -> StoreResult<FeedSubscription>;
}
