//! Platform-agnostic application bootstrap for Appdeck.
//!
//! Provides `AppState` (service container) and `AppStateBuilder`
//! (collaborator injection). Frontends construct this once at startup;
//! collaborators default to the in-process adapters so a host with no
//! external services still gets a fully working runtime.

use std::sync::Arc;

use appdeck_core::services::{ComposeService, FeedEngine};
use appdeck_core::{AppRuntime, AppStore, RealtimeHub, RuntimeContext, RuntimeOptions, TextGenerator};

pub mod adapters;

use adapters::{EchoGenerator, MemoryBackend};

/// Platform-agnostic application state.
///
/// Holds the runtime context, the interpreter runtime, and the
/// compose service. Every frontend constructs this once via
/// [`AppStateBuilder`].
pub struct AppState {
    /// Runtime context (holds all collaborator handles).
    pub ctx: Arc<RuntimeContext>,
    /// The interpreter runtime.
    pub runtime: AppRuntime,
    /// Compose/admin service.
    pub compose: ComposeService,
}

impl AppState {
    /// Start building an `AppState`.
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    /// Create a feed engine scoped to the current app identity.
    #[must_use]
    pub fn feed(&self, category: &str) -> FeedEngine {
        self.runtime.feed(category)
    }
}

/// Injects collaborator implementations into an [`AppState`].
///
/// Anything not provided falls back to the in-process adapters:
/// a shared [`MemoryBackend`] for storage and realtime, and the
/// [`EchoGenerator`] for text generation.
#[derive(Default)]
pub struct AppStateBuilder {
    store: Option<Arc<dyn AppStore>>,
    realtime: Option<Arc<dyn RealtimeHub>>,
    generator: Option<Arc<dyn TextGenerator>>,
    options: Option<RuntimeOptions>,
}

impl AppStateBuilder {
    /// Use a specific row store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn AppStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a specific realtime hub.
    #[must_use]
    pub fn with_realtime(mut self, realtime: Arc<dyn RealtimeHub>) -> Self {
        self.realtime = Some(realtime);
        self
    }

    /// Use a specific text generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Override the runtime tunables.
    #[must_use]
    pub fn with_options(mut self, options: RuntimeOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Build the state, filling gaps with in-process adapters.
    #[must_use]
    pub fn build(self) -> AppState {
        let (store, realtime) = match (self.store, self.realtime) {
            (Some(store), Some(realtime)) => (store, realtime),
            (Some(store), None) => {
                let backend = MemoryBackend::shared();
                (store, backend as Arc<dyn RealtimeHub>)
            }
            (None, Some(realtime)) => {
                let backend = MemoryBackend::shared();
                (backend as Arc<dyn AppStore>, realtime)
            }
            (None, None) => {
                // One shared backend, so inserts reach subscribers.
                let backend = MemoryBackend::shared();
                (
                    Arc::clone(&backend) as Arc<dyn AppStore>,
                    backend as Arc<dyn RealtimeHub>,
                )
            }
        };
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(EchoGenerator) as Arc<dyn TextGenerator>);

        let ctx = Arc::new(RuntimeContext::new(
            store,
            realtime,
            generator,
            self.options.unwrap_or_default(),
        ));
        AppState {
            runtime: AppRuntime::new(Arc::clone(&ctx)),
            compose: ComposeService::new(Arc::clone(&ctx)),
            ctx,
        }
    }
}
