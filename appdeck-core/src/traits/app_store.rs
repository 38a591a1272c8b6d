//! Row-store abstraction trait.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::Row;

/// Persistence collaborator.
///
/// The runtime never owns storage; `save_form` writes and feed loads
/// read through this boundary. Rows are scoped by app identity plus a
/// logical category (table) name.
///
/// Platform implementations:
/// - `MemoryBackend` in `appdeck-app` (in-process, demo/no-client mode)
/// - hosted row stores behind an HTTP client (out of scope here)
#[async_trait]
pub trait AppStore: Send + Sync {
    /// Insert a payload as a new row.
    ///
    /// # Arguments
    /// * `identity` - App identity key
    /// * `category` - Logical category (table) name
    /// * `payload` - Arbitrary JSON payload
    async fn insert(
        &self,
        identity: &str,
        category: &str,
        payload: serde_json::Value,
    ) -> StoreResult<Row>;

    /// Query rows for an identity and category, newest first.
    ///
    /// # Arguments
    /// * `identity` - App identity key
    /// * `category` - Logical category (table) name
    /// * `limit` - Maximum number of rows to return
    async fn query(&self, identity: &str, category: &str, limit: u32) -> StoreResult<Vec<Row>>;
}
