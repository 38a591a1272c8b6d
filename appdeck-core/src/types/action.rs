//! Action grammar: `verb:argument` command strings.
//!
//! Interactive components carry actions as plain strings in the app
//! configuration (`"navigate:register"`, `"save_form:registrations"`).
//! The string format exists only at the JSON boundary; everything past
//! deserialization operates on the parsed [`Action`].

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Verbs understood by the action executor.
///
/// Unrecognized verbs are preserved in [`ActionVerb::Unknown`] and
/// executed as a logged no-op, never as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionVerb {
    /// Push a screen onto the navigation history.
    Navigate,
    /// Pop the navigation history (no-op at the stack floor).
    GoBack,
    /// Submit the current form snapshot to the row store.
    SaveForm,
    /// Invoke the text-generation collaborator.
    Ai,
    /// Copy a form value for the host clipboard.
    Copy,
    /// Host-level share sheet.
    Share,
    /// Host-level file upload.
    UploadFile,
    /// Host-level download.
    Download,
    /// Host-level custom processing hook.
    Process,
    /// Anything else; carries the verbatim verb text.
    Unknown(String),
}

impl ActionVerb {
    /// The wire-level verb string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Navigate => "navigate",
            Self::GoBack => "go_back",
            Self::SaveForm => "save_form",
            Self::Ai => "ai",
            Self::Copy => "copy",
            Self::Share => "share",
            Self::UploadFile => "upload_file",
            Self::Download => "download",
            Self::Process => "process",
            Self::Unknown(verb) => verb,
        }
    }
}

impl From<&str> for ActionVerb {
    fn from(verb: &str) -> Self {
        match verb {
            "navigate" => Self::Navigate,
            "go_back" => Self::GoBack,
            "save_form" => Self::SaveForm,
            "ai" => Self::Ai,
            "copy" => Self::Copy,
            "share" => Self::Share,
            "upload_file" => Self::UploadFile,
            "download" => Self::Download,
            "process" => Self::Process,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A parsed `verb:argument` command.
///
/// The colon is the sole delimiter and only the first one splits; the
/// argument may itself contain colons and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The action verb.
    pub verb: ActionVerb,
    /// Verb-specific argument, possibly empty.
    pub argument: String,
}

impl Action {
    /// Parse an action string at the configuration boundary.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (verb, argument) = raw.split_once(':').unwrap_or((raw, ""));
        Self {
            verb: ActionVerb::from(verb.trim()),
            argument: argument.to_string(),
        }
    }
}

impl FromStr for Action {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.argument.is_empty() {
            write!(f, "{}", self.verb.as_str())
        } else {
            write!(f, "{}:{}", self.verb.as_str(), self.argument)
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
