//! Per-field form state.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::types::FieldValue;

/// Mutable map from component id to current input value.
///
/// One store per runtime instance. Values are free-form; no validation
/// happens here. The store is cleared only on explicit reset: an app
/// swap or a successful `save_form`.
pub struct FormStateStore {
    fields: RwLock<HashMap<String, FieldValue>>,
}

impl FormStateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: RwLock::new(HashMap::new()),
        }
    }

    /// Set a field value, overwriting any previous one.
    pub async fn set_field(&self, id: &str, value: FieldValue) {
        self.fields.write().await.insert(id.to_string(), value);
    }

    /// Current value of a field, if any.
    pub async fn get_field(&self, id: &str) -> Option<FieldValue> {
        self.fields.read().await.get(id).cloned()
    }

    /// The full field map, as submitted by `save_form`.
    pub async fn snapshot(&self) -> HashMap<String, FieldValue> {
        self.fields.read().await.clone()
    }

    /// Drop all values.
    pub async fn clear(&self) {
        self.fields.write().await.clear();
    }
}

impl Default for FormStateStore {
    fn default() -> Self {
        Self::new()
    }
}
