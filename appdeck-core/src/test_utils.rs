//! Test helpers.
//!
//! Mock collaborator implementations and factory methods shared by the
//! service tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::{mpsc, Notify, RwLock};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::services::{
    ActionExecutor, FormStateStore, NavigationController, RuntimeContext, RuntimeOptions,
};
use crate::traits::{AppStore, FeedSubscription, RealtimeHub, TextGenerator};
use crate::types::{AppConfig, Row};

// ===== MockAppStore =====

/// Coordination handle for holding an insert in flight.
pub struct InsertGate {
    /// Signaled when an insert reaches the store.
    pub entered: Notify,
    /// Signal this to let the held insert proceed.
    pub release: Notify,
}

pub struct MockAppStore {
    rows: RwLock<Vec<Row>>,
    /// If Some, insert returns this error (for testing retention paths).
    insert_error: RwLock<Option<String>>,
    /// If Some, query returns this error (for testing banner paths).
    query_error: RwLock<Option<String>>,
    insert_gate: RwLock<Option<Arc<InsertGate>>>,
}

impl MockAppStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            insert_error: RwLock::new(None),
            query_error: RwLock::new(None),
            insert_gate: RwLock::new(None),
        }
    }

    pub async fn set_insert_error(&self, err: Option<String>) {
        *self.insert_error.write().await = err;
    }

    pub async fn set_query_error(&self, err: Option<String>) {
        *self.query_error.write().await = err;
    }

    /// Make subsequent inserts block until released, so a test can
    /// change runtime state while the call is in flight.
    pub async fn hold_inserts(&self) -> Arc<InsertGate> {
        let gate = Arc::new(InsertGate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.insert_gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    pub async fn rows(&self) -> Vec<Row> {
        self.rows.read().await.clone()
    }

    /// Pre-populate a row, rescoping it to the given identity/category.
    pub async fn seed(&self, mut row: Row, identity: &str, category: &str) {
        row.identity = identity.to_string();
        row.category = category.to_string();
        self.rows.write().await.push(row);
    }
}

#[async_trait]
impl AppStore for MockAppStore {
    async fn insert(&self, identity: &str, category: &str, payload: Value) -> StoreResult<Row> {
        let gate = self.insert_gate.read().await.clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if let Some(ref detail) = *self.insert_error.read().await {
            return Err(StoreError::WriteFailed {
                category: category.to_string(),
                detail: detail.clone(),
            });
        }
        let row = Row {
            id: Uuid::new_v4().to_string(),
            identity: identity.to_string(),
            category: category.to_string(),
            payload,
            created_at: Utc::now(),
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn query(&self, identity: &str, category: &str, limit: u32) -> StoreResult<Vec<Row>> {
        if let Some(ref detail) = *self.query_error.read().await {
            return Err(StoreError::QueryFailed {
                category: category.to_string(),
                detail: detail.clone(),
            });
        }
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

// ===== MockRealtimeHub =====

pub struct MockRealtimeHub {
    senders: RwLock<HashMap<String, Vec<mpsc::UnboundedSender<Row>>>>,
}

impl MockRealtimeHub {
    pub fn new() -> Self {
        Self {
            senders: RwLock::new(HashMap::new()),
        }
    }

    /// Push a row to a channel, pruning closed subscribers.
    ///
    /// Returns how many live subscribers received it.
    pub async fn push(&self, channel: &str, row: Row) -> usize {
        let mut senders = self.senders.write().await;
        let Some(list) = senders.get_mut(channel) else {
            return 0;
        };
        list.retain(|tx| tx.send(row.clone()).is_ok());
        list.len()
    }

    pub async fn subscriber_count(&self, channel: &str) -> usize {
        self.senders
            .read()
            .await
            .get(channel)
            .map(|list| list.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RealtimeHub for MockRealtimeHub {
    async fn subscribe(&self, channel: &str) -> StoreResult<FeedSubscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders
            .write()
            .await
            .entry(channel.to_string())
            .or_default()
            .push(tx);
        Ok(FeedSubscription::new(channel.to_string(), rx))
    }
}

// ===== MockTextGenerator =====

pub struct MockTextGenerator {
    error: RwLock<Option<String>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            error: RwLock::new(None),
        }
    }

    pub async fn set_error(&self, err: Option<String>) {
        *self.error.write().await = err;
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, action: &str, text: &str, _context: &str) -> StoreResult<String> {
        if let Some(ref detail) = *self.error.read().await {
            return Err(StoreError::GenerationFailed {
                detail: detail.clone(),
            });
        }
        Ok(format!("({action}) {text}"))
    }
}

// ===== Factories =====

pub struct TestContext {
    pub ctx: Arc<RuntimeContext>,
    pub store: Arc<MockAppStore>,
    pub hub: Arc<MockRealtimeHub>,
    pub generator: Arc<MockTextGenerator>,
}

pub struct TestFixtures {
    pub ctx: Arc<RuntimeContext>,
    pub store: Arc<MockAppStore>,
    pub hub: Arc<MockRealtimeHub>,
    pub generator: Arc<MockTextGenerator>,
    pub form: Arc<FormStateStore>,
    pub nav: Arc<NavigationController>,
}

/// Create a test `RuntimeContext` with default options.
pub async fn create_test_context(identity: &str) -> TestContext {
    create_test_context_with_options(identity, RuntimeOptions::default()).await
}

/// Create a test `RuntimeContext` with explicit options.
pub async fn create_test_context_with_options(
    identity: &str,
    options: RuntimeOptions,
) -> TestContext {
    let store = Arc::new(MockAppStore::new());
    let hub = Arc::new(MockRealtimeHub::new());
    let generator = Arc::new(MockTextGenerator::new());
    let ctx = Arc::new(RuntimeContext::new(
        store.clone(),
        hub.clone(),
        generator.clone(),
        options,
    ));
    if !identity.is_empty() {
        ctx.begin_identity(identity).await;
    }
    TestContext {
        ctx,
        store,
        hub,
        generator,
    }
}

/// Create an `ActionExecutor` over fresh instance state, with the
/// navigation history seeded at a `home` entry screen.
pub async fn create_test_executor(identity: &str) -> (Arc<ActionExecutor>, TestFixtures) {
    let TestContext {
        ctx,
        store,
        hub,
        generator,
    } = create_test_context(identity).await;
    let form = Arc::new(FormStateStore::new());
    let nav = Arc::new(NavigationController::new());
    nav.reset("home".to_string()).await;

    let executor = Arc::new(ActionExecutor::new(
        Arc::clone(&ctx),
        Arc::clone(&form),
        Arc::clone(&nav),
    ));
    let fixtures = TestFixtures {
        ctx,
        store,
        hub,
        generator,
        form,
        nav,
    };
    (executor, fixtures)
}

/// A feed row with the given id, title, and creation time.
pub fn feed_row(id: &str, title: &str, created_at: DateTime<Utc>) -> Row {
    Row {
        id: id.to_string(),
        identity: String::new(),
        category: String::new(),
        payload: json!({ "title": title, "message": format!("{title} body") }),
        created_at,
    }
}

/// The two-screen registration app used by runtime-level tests.
pub fn sample_config() -> AppConfig {
    serde_json::from_value(json!({
        "name": "Club Fair",
        "theme": { "primary": "#2D6A4F" },
        "screens": [
            {
                "id": "home",
                "name": "Home",
                "components": [
                    {"type": "app_bar", "props": {"title": "Club Fair"}},
                    {"type": "text", "props": {"text": "Welcome!"}},
                    {"type": "button", "props": {"label": "Register", "action": "navigate:register"}}
                ]
            },
            {
                "id": "register",
                "name": "Register",
                "components": [
                    {"type": "app_bar", "props": {"title": "Register"}},
                    {"type": "text_field", "id": "name", "props": {"label": "Full name"}},
                    {"type": "button", "props": {"label": "Submit", "action": "save_form:registrations"}}
                ]
            }
        ]
    }))
    .expect("sample config is valid")
}
