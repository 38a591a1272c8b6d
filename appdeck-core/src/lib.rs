//! Appdeck Core Library
//!
//! The interpreter core for declarative app definitions: a JSON app
//! configuration (theme + tree of typed screens/components) becomes an
//! interactive, navigable, stateful application. Includes:
//! - Theme resolution and the typed configuration model
//! - Navigation history and per-field form state
//! - The component dispatcher and the `verb:argument` action grammar
//! - A realtime feed engine with deduplicated notifications
//! - The compose/admin counterpart (label maps, publishing)
//!
//! This library is platform-independent: persistence, realtime push,
//! and text generation are abstracted through traits and injected by
//! the host (see `appdeck-app` for the in-process adapters).

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, StoreError, StoreResult};
pub use services::{AppRuntime, RuntimeContext, RuntimeOptions};
pub use traits::{channel_key, AppStore, FeedSubscription, RealtimeHub, TextGenerator};
