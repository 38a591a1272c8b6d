//! Type definitions.

mod action;
mod config;
mod feed;
mod form;
mod render;
mod theme;

pub use action::{Action, ActionVerb};
pub use config::{
    AppBarProps, AppConfig, ButtonProps, Component, FeedProps, GridProps, ImageProps,
    ListTileProps, RatingProps, Screen, TextFieldProps, TextProps, MAX_TREE_DEPTH, MAX_TREE_NODES,
};
pub use feed::{FeedItem, Notification, Row, ANNOUNCEMENTS_CATEGORY, SUBMISSIONS_CATEGORY};
pub use form::FieldValue;
pub use render::{RenderedAppBar, RenderedNode, RenderedScreen};
pub use theme::{ResolvedTheme, Theme};
