//! DOM side of the canvas: the node renderer and the root click binding.

use crate::Shared;
use notes_core::{ClickEvent, ElementBox, MouseButton, Node, NodeId, NodeStyle, parse_px};
use notes_editor::Surface;
use std::rc::Weak;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, MouseEvent};

// ─── Renderer ────────────────────────────────────────────────────────────

/// Appends one absolutely positioned `<div>` per node to the root element.
pub struct DomSurface {
    document: Document,
    root: HtmlElement,
    node_class: Option<String>,
}

impl DomSurface {
    pub fn new(root: HtmlElement, node_class: Option<String>) -> Result<Self, JsValue> {
        let document = root
            .owner_document()
            .ok_or_else(|| JsValue::from_str("root element is not attached to a document"))?;
        Ok(Self {
            document,
            root,
            node_class,
        })
    }

    fn render(&self, id: NodeId, node: &Node) -> Result<(), JsValue> {
        let style = NodeStyle::for_node(node, self.node_class.as_deref());
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;

        let css = el.style();
        for (prop, value) in &style.declarations {
            css.set_property(prop, value)?;
        }
        if let Some(class) = &style.class {
            el.set_class_name(class);
        }
        el.set_attribute("data-node-id", id.as_str())?;
        el.set_text_content(Some(&style.text));

        self.root.append_child(&el)?;
        Ok(())
    }
}

impl Surface for DomSurface {
    fn append(&mut self, id: NodeId, node: &Node) {
        if let Err(e) = self.render(id, node) {
            log::warn!("failed to render node {id}: {e:?}");
        }
    }
}

// ─── Click binding ───────────────────────────────────────────────────────

/// The `click` listener on the root element. Dropping it detaches the
/// listener.
pub struct ClickBinding {
    root: HtmlElement,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl ClickBinding {
    /// Listen for clicks on `root` and feed them to the canvas. Holds the
    /// canvas weakly so the binding never keeps it alive.
    pub fn attach(root: &HtmlElement, shared: Weak<Shared>) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(shared) = shared.upgrade() {
                shared.canvas.handle_click(&click_event(&event));
            }
        });
        root.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        Ok(Self {
            root: root.clone(),
            callback,
        })
    }
}

impl Drop for ClickBinding {
    fn drop(&mut self) {
        let removed = self
            .root
            .remove_event_listener_with_callback("click", self.callback.as_ref().unchecked_ref());
        if let Err(e) = removed {
            log::warn!("failed to detach click listener: {e:?}");
        }
    }
}

/// Convert a DOM click into the canvas' event type. Targets that are not
/// HTML elements yield `target: None`.
fn click_event(event: &MouseEvent) -> ClickEvent {
    let target = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map(|el| element_box(&el));
    ClickEvent {
        client_x: f64::from(event.client_x()),
        client_y: f64::from(event.client_y()),
        button: MouseButton::from_dom(event.button()),
        target,
    }
}

fn element_box(el: &HtmlElement) -> ElementBox {
    let rect = el.get_bounding_client_rect();
    let b = ElementBox::at(rect.left(), rect.top());

    let style = web_sys::window().and_then(|w| w.get_computed_style(el).ok().flatten());
    let Some(style) = style else {
        return b;
    };
    let px = |prop: &str| {
        style
            .get_property_value(prop)
            .map(|v| parse_px(&v))
            .unwrap_or(0.0)
    };
    b.with_border(px("border-left-width"), px("border-top-width"))
        .with_padding(px("padding-left"), px("padding-top"))
}
