//! Text-generation abstraction trait.

use async_trait::async_trait;

use crate::error::StoreResult;

/// Text-generation collaborator, reached by the `ai` action verb.
///
/// A pure request/response boundary; no streaming. Retry policy, if
/// any, belongs to the calling host.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a sub-command.
    ///
    /// # Arguments
    /// * `action` - Generation intent (the action argument, e.g. `"summarize"`)
    /// * `text` - Author-supplied input text, possibly empty
    /// * `context` - Serialized runtime context (current form snapshot)
    async fn generate(&self, action: &str, text: &str, context: &str) -> StoreResult<String>;
}
