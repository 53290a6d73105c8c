//! Inline style derivation for rendered nodes.
//!
//! Renderers (the DOM surface in `notes-wasm`) apply these declarations
//! verbatim, so the exact strings are covered by tests here.

use crate::model::Node;

/// Inline declarations and text for one node element.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub declarations: Vec<(&'static str, String)>,
    pub class: Option<String>,
    pub text: String,
}

impl NodeStyle {
    /// Absolutely positioned at the node's coordinates inside the root.
    pub fn for_node(node: &Node, class: Option<&str>) -> Self {
        Self {
            declarations: vec![
                ("position", "absolute".to_string()),
                ("top", px(node.position.y)),
                ("left", px(node.position.x)),
            ],
            class: class.map(str::to_string),
            text: node.content.clone(),
        }
    }

    /// Declarations joined into a `style` attribute value.
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(prop, value)| format!("{prop}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format a pixel length the way JS number-to-string does: integral values
/// have no fractional part. `f64` Display already prints `20` for `20.0`
/// and never saturates the way an integer cast would.
fn px(v: f64) -> String {
    // JS prints -0 as "0".
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v}px")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_is_absolutely_positioned() {
        let style = NodeStyle::for_node(&Node::new(10.0, 20.0, "hello"), None);
        assert_eq!(
            style.css_text(),
            "position: absolute; top: 20px; left: 10px;"
        );
        assert_eq!(style.text, "hello");
        assert_eq!(style.class, None);
    }

    #[test]
    fn huge_positions_are_not_truncated() {
        let style = NodeStyle::for_node(&Node::new(1e20, -0.0, "far"), None);
        assert_eq!(
            style.declarations[2],
            ("left", "100000000000000000000px".to_string())
        );
        assert_eq!(style.declarations[1], ("top", "0px".to_string()));
    }

    #[test]
    fn fractional_positions_keep_their_fraction() {
        let style = NodeStyle::for_node(&Node::new(3.5, -1.25, "x"), Some("note"));
        assert_eq!(style.declarations[1], ("top", "-1.25px".to_string()));
        assert_eq!(style.declarations[2], ("left", "3.5px".to_string()));
        assert_eq!(style.class.as_deref(), Some("note"));
    }
}
