//! Component dispatch: config tree to render plan.
//!
//! Pure given (config, theme, navigation depth, form snapshot). The
//! render path never fails for data-shape reasons: unknown component
//! types become placeholders, dangling screen ids fall back to the
//! entry screen, and a malformed node never stops its siblings from
//! rendering.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{
    AppConfig, Component, FieldValue, RenderedAppBar, RenderedNode, RenderedScreen, ResolvedTheme,
};

/// Render one screen of a loaded app.
///
/// `screen_id` is resolved with the first-screen fallback policy; the
/// back affordance is enabled exactly when `nav_depth > 1`. Errors
/// only when the config has no screens at all, which load-time
/// validation already rejects.
pub fn render_screen(
    config: &AppConfig,
    theme: &ResolvedTheme,
    screen_id: &str,
    nav_depth: usize,
    form: &HashMap<String, FieldValue>,
) -> CoreResult<RenderedScreen> {
    let screen = config
        .resolve_screen(screen_id)
        .ok_or_else(|| CoreError::ValidationError("app has no screens".to_string()))?;

    // The app bar is excluded from normal recursive placement: at most
    // one is extracted from the screen's top-level components and
    // rendered as a fixed header.
    let app_bar = screen.components.iter().find_map(|component| {
        if let Component::AppBar(props) = component {
            Some(RenderedAppBar {
                title: props.title.clone(),
                can_go_back: nav_depth > 1,
            })
        } else {
            None
        }
    });

    let body = render_children(&screen.components, form);

    Ok(RenderedScreen {
        screen_id: screen.id.clone(),
        name: screen.name.clone(),
        theme: theme.clone(),
        app_bar,
        body,
    })
}

fn render_children(components: &[Component], form: &HashMap<String, FieldValue>) -> Vec<RenderedNode> {
    components
        .iter()
        .filter_map(|component| render_component(component, form))
        .collect()
}

/// Render one component; `None` for app bars, which only render at
/// screen level.
fn render_component(
    component: &Component,
    form: &HashMap<String, FieldValue>,
) -> Option<RenderedNode> {
    let node = match component {
        Component::AppBar(_) => {
            log::debug!("skipping app_bar outside screen-level placement");
            return None;
        }
        Component::Text(props) => RenderedNode::Text {
            content: props.text.clone(),
        },
        Component::Button(props) => RenderedNode::Button {
            label: props.label.clone(),
            action: props.action.clone(),
        },
        Component::TextField(props) => RenderedNode::TextField {
            id: props.id.clone(),
            label: props.label.clone(),
            placeholder: props.placeholder.clone(),
            required: props.required,
            value: props.id.as_deref().and_then(|id| form.get(id).cloned()),
        },
        Component::Rating(props) => RenderedNode::Rating {
            id: props.id.clone(),
            label: props.label.clone(),
            max: props.max,
            value: props.id.as_deref().and_then(|id| form.get(id).cloned()),
        },
        Component::Image(props) => RenderedNode::Image {
            url: props.url.clone(),
            caption: props.caption.clone(),
            hero: props.hero,
        },
        Component::ListTile(props) => RenderedNode::ListTile {
            title: props.title.clone(),
            subtitle: props.subtitle.clone(),
            action: props.action.clone(),
        },
        Component::Divider => RenderedNode::Divider,
        Component::Row(children) => RenderedNode::Row {
            children: render_children(children, form),
        },
        Component::Grid(props) => RenderedNode::Grid {
            columns: props.columns,
            children: render_children(&props.children, form),
        },
        Component::Container(children) => RenderedNode::Container {
            children: render_children(children, form),
        },
        Component::AnnouncementFeed(props) => RenderedNode::Feed {
            category: props.category.clone(),
        },
        Component::Unknown(kind) => {
            log::debug!("rendering placeholder for unknown component type: {kind}");
            RenderedNode::Placeholder { kind: kind.clone() }
        }
    };
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Screen, Theme};

    fn config(screens: Vec<Screen>) -> AppConfig {
        AppConfig {
            name: "Demo".to_string(),
            theme: Theme::default(),
            screens,
        }
    }

    fn screen(id: &str, components_json: &str) -> Screen {
        Screen {
            id: id.to_string(),
            name: id.to_string(),
            components: serde_json::from_str(components_json).unwrap(),
        }
    }

    #[test]
    fn unknown_type_renders_placeholder_without_killing_siblings() {
        let config = config(vec![screen(
            "home",
            r#"[
                {"type":"text","props":{"text":"one"}},
                {"type":"quantum_widget","props":{"qubits":8}},
                {"type":"text","props":{"text":"two"}},
                {"type":"divider"}
            ]"#,
        )]);

        let rendered = render_screen(
            &config,
            &ResolvedTheme::default(),
            "home",
            1,
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(rendered.body.len(), 4);
        assert_eq!(
            rendered.body[1],
            RenderedNode::Placeholder {
                kind: "quantum_widget".to_string()
            }
        );
        // All valid siblings survived.
        assert!(matches!(rendered.body[0], RenderedNode::Text { .. }));
        assert!(matches!(rendered.body[2], RenderedNode::Text { .. }));
        assert!(matches!(rendered.body[3], RenderedNode::Divider));
    }

    #[test]
    fn app_bar_is_extracted_not_placed_in_body() {
        let config = config(vec![screen(
            "home",
            r#"[
                {"type":"app_bar","props":{"title":"Welcome"}},
                {"type":"text","props":{"text":"body"}}
            ]"#,
        )]);

        let shallow = render_screen(
            &config,
            &ResolvedTheme::default(),
            "home",
            1,
            &HashMap::new(),
        )
        .unwrap();
        let bar = shallow.app_bar.expect("app bar extracted");
        assert_eq!(bar.title, "Welcome");
        assert!(!bar.can_go_back);
        assert_eq!(shallow.body.len(), 1);

        let deep = render_screen(
            &config,
            &ResolvedTheme::default(),
            "home",
            2,
            &HashMap::new(),
        )
        .unwrap();
        assert!(deep.app_bar.unwrap().can_go_back);
    }

    #[test]
    fn missing_screen_falls_back_to_entry() {
        let config = config(vec![
            screen("home", r#"[{"type":"text","props":{"text":"entry"}}]"#),
            screen("about", "[]"),
        ]);

        let rendered = render_screen(
            &config,
            &ResolvedTheme::default(),
            "deleted_screen",
            1,
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(rendered.screen_id, "home");
    }

    #[test]
    fn text_field_reads_its_form_value() {
        let config = config(vec![screen(
            "register",
            r#"[{"type":"text_field","id":"name","props":{"label":"Name"}}]"#,
        )]);
        let mut form = HashMap::new();
        form.insert("name".to_string(), FieldValue::from("Ada"));

        let rendered = render_screen(
            &config,
            &ResolvedTheme::default(),
            "register",
            1,
            &form,
        )
        .unwrap();
        let RenderedNode::TextField { value, .. } = &rendered.body[0] else {
            panic!("expected text_field");
        };
        assert_eq!(value.as_ref(), Some(&FieldValue::from("Ada")));
    }

    #[test]
    fn grid_recurses_with_columns() {
        let config = config(vec![screen(
            "home",
            r#"[{
                "type":"grid",
                "props":{"columns":3},
                "children":[{"type":"divider"},{"type":"divider"}]
            }]"#,
        )]);

        let rendered = render_screen(
            &config,
            &ResolvedTheme::default(),
            "home",
            1,
            &HashMap::new(),
        )
        .unwrap();
        let RenderedNode::Grid { columns, children } = &rendered.body[0] else {
            panic!("expected grid");
        };
        assert_eq!(*columns, 3);
        assert_eq!(children.len(), 2);
    }
}
