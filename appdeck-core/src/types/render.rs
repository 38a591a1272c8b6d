//! Rendered output types.
//!
//! The dispatcher turns a screen's component tree into this render
//! plan; a host frontend maps it onto its own widget system. Rendering
//! never fails for data-shape reasons — malformed nodes surface as
//! [`RenderedNode::Placeholder`].

use serde::Serialize;

use crate::types::action::Action;
use crate::types::form::FieldValue;
use crate::types::theme::ResolvedTheme;

/// A fully rendered screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedScreen {
    /// Id of the screen that was actually rendered (after fallback).
    pub screen_id: String,
    /// Screen display name.
    pub name: String,
    /// Resolved theme for the whole screen.
    pub theme: ResolvedTheme,
    /// Fixed header, if the screen declares an `app_bar`.
    pub app_bar: Option<RenderedAppBar>,
    /// Screen body in document order.
    pub body: Vec<RenderedNode>,
}

/// The fixed screen header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedAppBar {
    /// Header title.
    pub title: String,
    /// Whether the back affordance is enabled (history depth > 1).
    pub can_go_back: bool,
}

/// One node of the render plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderedNode {
    /// Static text run.
    Text {
        /// Text content.
        content: String,
    },
    /// Tappable button.
    Button {
        /// Button label.
        label: String,
        /// Parsed action to dispatch on tap.
        action: Option<Action>,
    },
    /// Text input with its current form value injected.
    TextField {
        /// Form-state key.
        id: Option<String>,
        /// Field label.
        label: String,
        /// Placeholder text.
        placeholder: String,
        /// Presentational required marker.
        required: bool,
        /// Current value from form state.
        value: Option<FieldValue>,
    },
    /// Rating input with its current form value injected.
    Rating {
        /// Form-state key.
        id: Option<String>,
        /// Field label.
        label: String,
        /// Maximum rating.
        max: u32,
        /// Current value from form state.
        value: Option<FieldValue>,
    },
    /// Image or hero banner.
    Image {
        /// Image URL.
        url: String,
        /// Optional caption.
        caption: Option<String>,
        /// Full-width hero treatment.
        hero: bool,
    },
    /// List row.
    ListTile {
        /// Tile title.
        title: String,
        /// Optional subtitle.
        subtitle: Option<String>,
        /// Optional tap action.
        action: Option<Action>,
    },
    /// Horizontal rule.
    Divider,
    /// Horizontal container.
    Row {
        /// Rendered children.
        children: Vec<RenderedNode>,
    },
    /// Grid container.
    Grid {
        /// Column count.
        columns: u32,
        /// Rendered children.
        children: Vec<RenderedNode>,
    },
    /// Plain vertical container.
    Container {
        /// Rendered children.
        children: Vec<RenderedNode>,
    },
    /// Mount point for a live feed; content comes from the feed
    /// engine, scoped by the app identity.
    Feed {
        /// Row-store category the feed reads from.
        category: String,
    },
    /// Visible, non-fatal stand-in for an unrecognized component type.
    Placeholder {
        /// The unrecognized type name.
        kind: String,
    },
}
