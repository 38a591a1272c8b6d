//! App configuration document model.
//!
//! An [`AppConfig`] is supplied as external JSON by the generation
//! service. Deserialization is deliberately forgiving: unknown
//! component types become [`Component::Unknown`] instead of a parse
//! error, and missing props fall back to defaults. The only hard
//! gate is [`AppConfig::validate`], which rejects structurally
//! unusable documents (no screens, unbounded trees) at load time so
//! the render path never has to.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::types::action::Action;
use crate::types::theme::Theme;

/// Maximum component tree depth accepted at load time.
pub const MAX_TREE_DEPTH: usize = 32;

/// Maximum total component count accepted at load time.
pub const MAX_TREE_NODES: usize = 10_000;

/// One app definition: identity, theme, and screen tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// App name; the identity key scoping persistence and realtime
    /// channels.
    pub name: String,
    /// Raw theme tokens.
    #[serde(default)]
    pub theme: Theme,
    /// Screens; the first one is the entry point.
    #[serde(default)]
    pub screens: Vec<Screen>,
}

impl AppConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load-time structural validation.
    ///
    /// Rejects configurations with no screens, trees deeper than
    /// [`MAX_TREE_DEPTH`], or more than [`MAX_TREE_NODES`] components.
    /// A validated tree is safe to walk recursively.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("app name is empty".to_string()));
        }
        if self.screens.is_empty() {
            return Err(CoreError::ValidationError(
                "app has no screens".to_string(),
            ));
        }
        let mut total = 0usize;
        for screen in &self.screens {
            for component in &screen.components {
                check_tree(component, 1, &mut total)?;
            }
        }
        Ok(())
    }

    /// The entry screen, if any screen exists.
    #[must_use]
    pub fn entry_screen(&self) -> Option<&Screen> {
        self.screens.first()
    }

    /// Look up a screen by id.
    #[must_use]
    pub fn screen(&self, id: &str) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    /// Look up a screen by id, falling back to the entry screen.
    ///
    /// This is the availability-over-correctness policy for dangling
    /// `navigate` targets: an unknown id renders the first screen
    /// instead of failing.
    #[must_use]
    pub fn resolve_screen(&self, id: &str) -> Option<&Screen> {
        self.screen(id).or_else(|| self.entry_screen())
    }
}

fn check_tree(component: &Component, depth: usize, total: &mut usize) -> CoreResult<()> {
    *total += 1;
    if *total > MAX_TREE_NODES {
        return Err(CoreError::ValidationError(format!(
            "component tree exceeds {MAX_TREE_NODES} nodes"
        )));
    }
    if depth > MAX_TREE_DEPTH {
        return Err(CoreError::ValidationError(format!(
            "component tree exceeds depth {MAX_TREE_DEPTH}"
        )));
    }
    for child in component.children() {
        check_tree(child, depth + 1, total)?;
    }
    Ok(())
}

/// One screen of an app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    /// Screen id, unique within the app.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Top-level components.
    #[serde(default)]
    pub components: Vec<Component>,
}

/// One typed node of a screen's component tree.
///
/// Closed tagged union over the known component kinds, with an
/// explicit [`Component::Unknown`] catch-all so an unrecognized type
/// degrades to a placeholder instead of poisoning the whole document.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Static text run.
    Text(TextProps),
    /// Tappable button carrying an action.
    Button(ButtonProps),
    /// Free-form input field; stateful when it has an id.
    TextField(TextFieldProps),
    /// Star-rating input; stateful when it has an id.
    Rating(RatingProps),
    /// Image or hero banner.
    Image(ImageProps),
    /// List row with optional subtitle and action.
    ListTile(ListTileProps),
    /// Horizontal rule.
    Divider,
    /// Fixed screen header; extracted at screen level, never placed
    /// recursively.
    AppBar(AppBarProps),
    /// Horizontal container.
    Row(Vec<Component>),
    /// Column-count grid container.
    Grid(GridProps),
    /// Plain vertical container.
    Container(Vec<Component>),
    /// Live feed of published items, scoped by app identity.
    AnnouncementFeed(FeedProps),
    /// Unrecognized component type; preserves the type name for the
    /// render-time placeholder.
    Unknown(String),
}

/// Props for [`Component::Text`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextProps {
    /// Text content.
    pub text: String,
}

/// Props for [`Component::Button`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonProps {
    /// Button label.
    pub label: String,
    /// Parsed action, if the author attached one.
    pub action: Option<Action>,
}

/// Props for [`Component::TextField`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFieldProps {
    /// Form-state key; a field without an id is display-only.
    pub id: Option<String>,
    /// Field label.
    pub label: String,
    /// Placeholder text.
    pub placeholder: String,
    /// Presentational required marker; not enforced anywhere.
    pub required: bool,
}

/// Props for [`Component::Rating`].
#[derive(Debug, Clone, PartialEq)]
pub struct RatingProps {
    /// Form-state key.
    pub id: Option<String>,
    /// Field label.
    pub label: String,
    /// Maximum rating value.
    pub max: u32,
}

impl Default for RatingProps {
    fn default() -> Self {
        Self {
            id: None,
            label: String::new(),
            max: 5,
        }
    }
}

/// Props for [`Component::Image`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageProps {
    /// Image URL.
    pub url: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// Whether this renders as a full-width hero banner.
    pub hero: bool,
}

/// Props for [`Component::ListTile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTileProps {
    /// Tile title.
    pub title: String,
    /// Optional subtitle.
    pub subtitle: Option<String>,
    /// Optional tap action.
    pub action: Option<Action>,
}

/// Props for [`Component::AppBar`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppBarProps {
    /// Header title.
    pub title: String,
}

/// Props for [`Component::Grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridProps {
    /// Column count.
    pub columns: u32,
    /// Child components.
    pub children: Vec<Component>,
}

impl Default for GridProps {
    fn default() -> Self {
        Self {
            columns: 2,
            children: Vec::new(),
        }
    }
}

/// Props for [`Component::AnnouncementFeed`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedProps {
    /// Row-store category the feed reads from.
    pub category: String,
}

impl Default for FeedProps {
    fn default() -> Self {
        Self {
            category: crate::types::feed::ANNOUNCEMENTS_CATEGORY.to_string(),
        }
    }
}

impl Component {
    /// Child list for container variants; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Component] {
        match self {
            Self::Row(children) | Self::Container(children) => children,
            Self::Grid(props) => &props.children,
            _ => &[],
        }
    }

    /// Form-state key, for the stateful variants.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::TextField(props) => props.id.as_deref(),
            Self::Rating(props) => props.id.as_deref(),
            _ => None,
        }
    }

    /// First non-empty label or title, for the field-label map.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        let label = match self {
            Self::TextField(props) => props.label.as_str(),
            Self::Rating(props) => props.label.as_str(),
            Self::ListTile(props) => props.title.as_str(),
            _ => "",
        };
        if label.is_empty() {
            None
        } else {
            Some(label)
        }
    }

    /// The wire-level type tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Button(_) => "button",
            Self::TextField(_) => "text_field",
            Self::Rating(_) => "rating",
            Self::Image(props) => {
                if props.hero {
                    "hero"
                } else {
                    "image"
                }
            }
            Self::ListTile(_) => "list_tile",
            Self::Divider => "divider",
            Self::AppBar(_) => "app_bar",
            Self::Row(_) => "row",
            Self::Grid(_) => "grid",
            Self::Container(_) => "container",
            Self::AnnouncementFeed(_) => "announcement_feed",
            Self::Unknown(kind) => kind,
        }
    }
}

// ===== Wire format =====
//
// The JSON shape is `{ "type": "...", "id": "...", "props": {...},
// "children": [...] }`. Props extraction is defensive: wrong-typed or
// missing entries fall back to defaults rather than erroring, per the
// graceful-degradation contract.

#[derive(Deserialize)]
struct RawComponent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    props: Map<String, Value>,
    #[serde(default)]
    children: Vec<Component>,
}

fn str_prop(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| props.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn u32_prop(props: &Map<String, Value>, key: &str) -> Option<u32> {
    props
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn bool_prop(props: &Map<String, Value>, key: &str) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn action_prop(props: &Map<String, Value>, key: &str) -> Option<Action> {
    props
        .get(key)
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
        .map(Action::parse)
}

impl From<RawComponent> for Component {
    fn from(raw: RawComponent) -> Self {
        let RawComponent {
            kind,
            id,
            props,
            children,
        } = raw;
        match kind.as_str() {
            "text" => Self::Text(TextProps {
                text: str_prop(&props, &["text", "content"]).unwrap_or_default(),
            }),
            "button" => Self::Button(ButtonProps {
                label: str_prop(&props, &["label", "text"]).unwrap_or_default(),
                action: action_prop(&props, "action"),
            }),
            "text_field" => Self::TextField(TextFieldProps {
                id,
                label: str_prop(&props, &["label"]).unwrap_or_default(),
                placeholder: str_prop(&props, &["placeholder"]).unwrap_or_default(),
                required: bool_prop(&props, "required"),
            }),
            "rating" => Self::Rating(RatingProps {
                id,
                label: str_prop(&props, &["label"]).unwrap_or_default(),
                max: u32_prop(&props, "max").unwrap_or(5),
            }),
            "image" | "hero" => Self::Image(ImageProps {
                url: str_prop(&props, &["url", "src"]).unwrap_or_default(),
                caption: str_prop(&props, &["caption"]),
                hero: kind == "hero",
            }),
            "list_tile" => Self::ListTile(ListTileProps {
                title: str_prop(&props, &["title", "label"]).unwrap_or_default(),
                subtitle: str_prop(&props, &["subtitle"]),
                action: action_prop(&props, "action"),
            }),
            "divider" => Self::Divider,
            "app_bar" => Self::AppBar(AppBarProps {
                title: str_prop(&props, &["title", "label"]).unwrap_or_default(),
            }),
            "row" => Self::Row(children),
            "grid" => Self::Grid(GridProps {
                columns: u32_prop(&props, "columns").unwrap_or(2).max(1),
                children,
            }),
            "container" => Self::Container(children),
            "announcement_feed" => Self::AnnouncementFeed(FeedProps {
                category: str_prop(&props, &["category"])
                    .unwrap_or_else(|| FeedProps::default().category),
            }),
            _ => Self::Unknown(kind),
        }
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawComponent::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut props = Map::new();
        let mut id: Option<&str> = None;
        let mut children: Option<&[Component]> = None;

        match self {
            Self::Text(p) => {
                props.insert("text".to_string(), Value::String(p.text.clone()));
            }
            Self::Button(p) => {
                props.insert("label".to_string(), Value::String(p.label.clone()));
                if let Some(action) = &p.action {
                    props.insert("action".to_string(), Value::String(action.to_string()));
                }
            }
            Self::TextField(p) => {
                id = p.id.as_deref();
                props.insert("label".to_string(), Value::String(p.label.clone()));
                props.insert(
                    "placeholder".to_string(),
                    Value::String(p.placeholder.clone()),
                );
                if p.required {
                    props.insert("required".to_string(), Value::Bool(true));
                }
            }
            Self::Rating(p) => {
                id = p.id.as_deref();
                props.insert("label".to_string(), Value::String(p.label.clone()));
                props.insert("max".to_string(), Value::from(p.max));
            }
            Self::Image(p) => {
                props.insert("url".to_string(), Value::String(p.url.clone()));
                if let Some(caption) = &p.caption {
                    props.insert("caption".to_string(), Value::String(caption.clone()));
                }
            }
            Self::ListTile(p) => {
                props.insert("title".to_string(), Value::String(p.title.clone()));
                if let Some(subtitle) = &p.subtitle {
                    props.insert("subtitle".to_string(), Value::String(subtitle.clone()));
                }
                if let Some(action) = &p.action {
                    props.insert("action".to_string(), Value::String(action.to_string()));
                }
            }
            Self::Divider | Self::Unknown(_) => {}
            Self::AppBar(p) => {
                props.insert("title".to_string(), Value::String(p.title.clone()));
            }
            Self::Row(c) | Self::Container(c) => children = Some(c),
            Self::Grid(p) => {
                props.insert("columns".to_string(), Value::from(p.columns));
                children = Some(&p.children);
            }
            Self::AnnouncementFeed(p) => {
                props.insert("category".to_string(), Value::String(p.category.clone()));
            }
        }

        let mut len = 2;
        if id.is_some() {
            len += 1;
        }
        if children.is_some() {
            len += 1;
        }
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", self.kind())?;
        if let Some(id) = id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("props", &props)?;
        if let Some(children) = children {
            map.serialize_entry("children", children)?;
        }
        map.end()
    }
}
