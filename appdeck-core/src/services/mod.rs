//! Runtime service layer.

mod action;
mod compose;
mod feed;
mod form;
mod navigation;
mod render;
mod runtime;

pub use action::{ActionExecutor, ActionOutcome, AI_OUTPUT_FIELD, AI_PROMPT_FIELD};
pub use compose::{ComposeService, LabeledField, Submission};
pub use feed::{FeedEngine, FeedView};
pub use form::FormStateStore;
pub use navigation::NavigationController;
pub use render::render_screen;
pub use runtime::AppRuntime;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;

use crate::traits::{AppStore, RealtimeHub, TextGenerator};

/// Tunables for one runtime instance.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Row limit for the initial feed fetch.
    pub feed_page_size: u32,
    /// How long a feed notification stays up before auto-dismissing.
    pub notification_ttl: Duration,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            feed_page_size: 50,
            notification_ttl: Duration::seconds(5),
        }
    }
}

/// Runtime context - holds all collaborator handles.
///
/// The platform layer creates this once and injects its own
/// collaborator implementations. It also owns the two pieces of
/// cross-cutting instance state: the current app identity and the
/// epoch counter that invalidates stale async results after an
/// identity change.
pub struct RuntimeContext {
    /// Row store.
    app_store: Arc<dyn AppStore>,
    /// Realtime push hub.
    realtime: Arc<dyn RealtimeHub>,
    /// Text-generation collaborator.
    generator: Arc<dyn TextGenerator>,
    /// Tunables.
    options: RuntimeOptions,
    /// Identity of the currently loaded app.
    identity: RwLock<String>,
    /// Bumped on every identity change.
    epoch: AtomicU64,
}

impl RuntimeContext {
    /// Create a runtime context.
    #[must_use]
    pub fn new(
        app_store: Arc<dyn AppStore>,
        realtime: Arc<dyn RealtimeHub>,
        generator: Arc<dyn TextGenerator>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            app_store,
            realtime,
            generator,
            options,
            identity: RwLock::new(String::new()),
            epoch: AtomicU64::new(0),
        }
    }

    /// The row store.
    #[must_use]
    pub fn app_store(&self) -> &Arc<dyn AppStore> {
        &self.app_store
    }

    /// The realtime hub.
    #[must_use]
    pub fn realtime(&self) -> &Arc<dyn RealtimeHub> {
        &self.realtime
    }

    /// The text generator.
    #[must_use]
    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    /// Runtime tunables.
    #[must_use]
    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    /// The current app identity.
    pub async fn identity(&self) -> String {
        self.identity.read().await.clone()
    }

    /// The current epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Whether `epoch` is still the current one.
    ///
    /// Callers capture the epoch before an external await and check it
    /// again before applying the result, so a response belonging to a
    /// previous app can never corrupt the current one.
    #[must_use]
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    /// Switch to a new app identity, invalidating everything in flight.
    ///
    /// Returns the new epoch.
    pub async fn begin_identity(&self, identity: &str) -> u64 {
        *self.identity.write().await = identity.to_string();
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }
}
