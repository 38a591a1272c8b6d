//! Unified error type definitions.

use serde::Serialize;
use thiserror::Error;

/// Error type for the external collaborator boundary.
///
/// Everything the runtime reaches through a trait — the row store, the
/// realtime channel, the text generator — reports failures as a
/// `StoreError`. All variants are serializable for structured error
/// reporting to a host frontend.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum StoreError {
    /// A network-level failure (connection refused, DNS failure, etc.).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// An insert against the row store failed.
    #[error("Write failed for category {category}: {detail}")]
    WriteFailed {
        /// Logical category (table) the write targeted.
        category: String,
        /// Error details.
        detail: String,
    },

    /// A query against the row store failed.
    #[error("Query failed for category {category}: {detail}")]
    QueryFailed {
        /// Logical category (table) the query targeted.
        category: String,
        /// Error details.
        detail: String,
    },

    /// Opening a realtime subscription failed.
    #[error("Subscribe failed for channel {channel}: {detail}")]
    SubscribeFailed {
        /// Channel key the subscription targeted.
        channel: String,
        /// Error details.
        detail: String,
    },

    /// The text-generation collaborator returned an error.
    #[error("Generation failed: {detail}")]
    GenerationFailed {
        /// Error details.
        detail: String,
    },
}

/// Result alias for collaborator operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Core layer error type.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No app configuration has been loaded into the runtime yet.
    #[error("No app loaded")]
    NoAppLoaded,

    /// The app configuration failed load-time validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An async result arrived after the app identity changed and was
    /// discarded rather than applied to the new instance.
    #[error("App identity changed while the call was in flight")]
    IdentityChanged,

    /// Collaborator error (converted from the trait boundary).
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Whether this is expected behavior (bad author input, stale
    /// results, etc.), used for log level classification.
    ///
    /// Log at `warn` when this returns `true` and at `error` otherwise.
    /// **Update this method when adding new variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NoAppLoaded | Self::ValidationError(_) | Self::IdentityChanged
        )
    }
}

/// Core layer Result type alias.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}
