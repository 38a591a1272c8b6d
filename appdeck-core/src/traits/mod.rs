//! External collaborator abstraction traits.

mod app_store;
mod realtime;
mod text_generator;

pub use app_store::AppStore;
pub use realtime::{channel_key, FeedSubscription, RealtimeHub};
pub use text_generator::TextGenerator;
