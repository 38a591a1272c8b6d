//! Theme token types and resolution.

use serde::{Deserialize, Serialize};

/// Raw theme tokens as they appear in an app configuration.
///
/// Every field is optional; authors routinely omit tokens and the
/// generation service is not required to emit all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Primary accent color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Secondary accent color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    /// Page background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Card/sheet surface color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    /// Body text color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

/// Fully resolved theme: every token present.
///
/// Absent tokens never propagate past [`Theme::resolve`] — consumers
/// downstream can rely on every field being set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    /// Primary accent color.
    pub primary: String,
    /// Secondary accent color.
    pub secondary: String,
    /// Page background color.
    pub background: String,
    /// Card/sheet surface color.
    pub surface: String,
    /// Body text color.
    pub text: String,
    /// Font family name.
    pub font: String,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self {
            primary: "#6750A4".to_string(),
            secondary: "#958DA5".to_string(),
            background: "#FFFFFF".to_string(),
            surface: "#F4F3F7".to_string(),
            text: "#1C1B1F".to_string(),
            font: "Inter".to_string(),
        }
    }
}

impl Theme {
    /// Resolve raw tokens against the built-in defaults.
    ///
    /// Total function: never fails, every output token is populated.
    #[must_use]
    pub fn resolve(&self) -> ResolvedTheme {
        let defaults = ResolvedTheme::default();
        ResolvedTheme {
            primary: self.primary.clone().unwrap_or(defaults.primary),
            secondary: self.secondary.clone().unwrap_or(defaults.secondary),
            background: self.background.clone().unwrap_or(defaults.background),
            surface: self.surface.clone().unwrap_or(defaults.surface),
            text: self.text.clone().unwrap_or(defaults.text),
            font: self.font.clone().unwrap_or(defaults.font),
        }
    }
}
