//! Runtime assembly: one live app instance.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::render::render_screen;
use crate::services::{
    ActionExecutor, ActionOutcome, FeedEngine, FormStateStore, NavigationController,
    RuntimeContext,
};
use crate::types::{Action, AppConfig, FieldValue, RenderedScreen, ResolvedTheme};

struct LoadedApp {
    config: AppConfig,
    theme: ResolvedTheme,
}

/// One interpreter instance over one app configuration.
///
/// Owns the instance state (navigation history, form state) and the
/// executor bound to it. The runtime is cooperative and
/// single-threaded in spirit: state transitions are synchronous, and
/// external calls run without blocking rendering. Swapping
/// configurations resets navigation and form state together — never
/// partially — and bumps the context epoch so anything still in
/// flight for the old identity is discarded on arrival.
pub struct AppRuntime {
    ctx: Arc<RuntimeContext>,
    loaded: RwLock<Option<LoadedApp>>,
    nav: Arc<NavigationController>,
    form: Arc<FormStateStore>,
    executor: ActionExecutor,
}

impl AppRuntime {
    /// Create an empty runtime; call [`load`](Self::load) next.
    #[must_use]
    pub fn new(ctx: Arc<RuntimeContext>) -> Self {
        let nav = Arc::new(NavigationController::new());
        let form = Arc::new(FormStateStore::new());
        let executor = ActionExecutor::new(Arc::clone(&ctx), Arc::clone(&form), Arc::clone(&nav));
        Self {
            ctx,
            loaded: RwLock::new(None),
            nav,
            form,
            executor,
        }
    }

    /// The shared runtime context.
    #[must_use]
    pub fn context(&self) -> &Arc<RuntimeContext> {
        &self.ctx
    }

    /// Navigation history of this instance.
    #[must_use]
    pub fn navigation(&self) -> &Arc<NavigationController> {
        &self.nav
    }

    /// Form state of this instance.
    #[must_use]
    pub fn form(&self) -> &Arc<FormStateStore> {
        &self.form
    }

    /// Load (or swap to) an app configuration.
    ///
    /// Validates the document, switches the context identity, and
    /// resets navigation to the new entry screen together with a
    /// cleared form.
    pub async fn load(&self, config: AppConfig) -> CoreResult<()> {
        config.validate()?;
        let entry = config
            .entry_screen()
            .map(|screen| screen.id.clone())
            .ok_or_else(|| CoreError::ValidationError("app has no screens".to_string()))?;

        self.ctx.begin_identity(&config.name).await;
        self.nav.reset(entry).await;
        self.form.clear().await;

        let theme = config.theme.resolve();
        *self.loaded.write().await = Some(LoadedApp { config, theme });
        log::info!("loaded app config: {}", self.ctx.identity().await);
        Ok(())
    }

    /// Render the current screen.
    pub async fn render(&self) -> CoreResult<RenderedScreen> {
        let loaded = self.loaded.read().await;
        let app = loaded.as_ref().ok_or(CoreError::NoAppLoaded)?;
        let current = self.nav.current().await.unwrap_or_else(|| {
            app.config
                .entry_screen()
                .map(|screen| screen.id.clone())
                .unwrap_or_default()
        });
        let depth = self.nav.depth().await;
        let form = self.form.snapshot().await;
        render_screen(&app.config, &app.theme, &current, depth, &form)
    }

    /// Parse and execute a raw `verb:argument` string.
    pub async fn dispatch(&self, raw: &str) -> CoreResult<ActionOutcome> {
        self.execute(&Action::parse(raw)).await
    }

    /// Execute a parsed action.
    pub async fn execute(&self, action: &Action) -> CoreResult<ActionOutcome> {
        self.executor.execute(action).await
    }

    /// Write a field value, as a host does on user input.
    pub async fn set_field(&self, id: &str, value: FieldValue) {
        self.form.set_field(id, value).await;
    }

    /// Create a feed engine scoped to this runtime's identity.
    ///
    /// The caller mounts it per `announcement_feed` (or compose view)
    /// and must unmount before swapping configurations.
    #[must_use]
    pub fn feed(&self, category: &str) -> FeedEngine {
        FeedEngine::new(Arc::clone(&self.ctx), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_context, sample_config};

    #[tokio::test]
    async fn render_before_load_is_an_error() {
        let ctx = create_test_context("").await;
        let runtime = AppRuntime::new(Arc::clone(&ctx.ctx));
        assert!(matches!(runtime.render().await, Err(CoreError::NoAppLoaded)));
    }

    #[tokio::test]
    async fn load_starts_at_the_entry_screen() {
        let ctx = create_test_context("").await;
        let runtime = AppRuntime::new(Arc::clone(&ctx.ctx));
        runtime.load(sample_config()).await.unwrap();

        let rendered = runtime.render().await.unwrap();
        assert_eq!(rendered.screen_id, "home");
        assert_eq!(runtime.navigation().depth().await, 1);
        assert_eq!(ctx.ctx.identity().await, "Club Fair");
    }

    #[tokio::test]
    async fn swap_resets_navigation_and_form_together() {
        let ctx = create_test_context("").await;
        let runtime = AppRuntime::new(Arc::clone(&ctx.ctx));
        runtime.load(sample_config()).await.unwrap();
        runtime.dispatch("navigate:register").await.unwrap();
        runtime.set_field("name", "Ada".into()).await;
        let epoch_before = ctx.ctx.epoch();

        let mut other = sample_config();
        other.name = "Other App".to_string();
        runtime.load(other).await.unwrap();

        assert_eq!(runtime.navigation().depth().await, 1);
        assert!(runtime.form().snapshot().await.is_empty());
        assert_eq!(ctx.ctx.identity().await, "Other App");
        assert!(ctx.ctx.epoch() > epoch_before);
    }

    #[tokio::test]
    async fn load_rejects_invalid_configs() {
        let ctx = create_test_context("").await;
        let runtime = AppRuntime::new(Arc::clone(&ctx.ctx));
        let config = AppConfig {
            name: "Empty".to_string(),
            theme: crate::types::Theme::default(),
            screens: vec![],
        };
        assert!(matches!(
            runtime.load(config).await,
            Err(CoreError::ValidationError(_))
        ));
        // Nothing was partially applied.
        assert!(matches!(runtime.render().await, Err(CoreError::NoAppLoaded)));
    }
}
