//! Offline text generator.

use async_trait::async_trait;

use appdeck_core::{StoreResult, TextGenerator};

/// Deterministic stand-in for a hosted text-generation service.
///
/// Produces a readable draft from the intent and input so `ai` actions
/// work in demos and tests without network access.
pub struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, action: &str, text: &str, _context: &str) -> StoreResult<String> {
        if text.is_empty() {
            Ok(format!("[{action}] Nothing to work with yet — add some input first."))
        } else {
            Ok(format!("[{action}] {text}"))
        }
    }
}
