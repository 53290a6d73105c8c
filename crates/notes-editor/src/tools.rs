//! Tool system for canvas clicks.
//!
//! A tool is a named click behavior. The canvas keeps a registry of tools
//! keyed by id and dispatches surface clicks to the active one, passing a
//! `ToolContext` through which the tool reaches back into the canvas.

use crate::canvas::Canvas;
use notes_core::{NodeId, PointerInfo, ToolId};
use std::rc::Rc;

/// Trait for pluggable click behaviors.
///
/// Handlers take `&self`: the canvas shares tools behind `Rc` and may call
/// them re-entrantly. Tools needing state use interior mutability.
pub trait Tool {
    fn id(&self) -> ToolId;

    /// Handle a click at surface-local coordinates. Tools without a click
    /// behavior can be registered and selected; clicking does nothing.
    fn on_click(&self, _pointer: PointerInfo, _ctx: &ToolContext<'_>) {}
}

/// What a tool sees of the canvas while handling a click.
pub struct ToolContext<'a> {
    canvas: &'a Canvas,
}

impl<'a> ToolContext<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &'a Canvas {
        self.canvas
    }

    /// Shorthand for `ctx.canvas().add_node(..)`.
    pub fn add_node(&self, x: f64, y: f64, content: &str) -> NodeId {
        self.canvas.add_node(x, y, content)
    }
}

// ─── Stamp Tool ──────────────────────────────────────────────────────────

/// Places a node with fixed content wherever the user clicks.
#[derive(Debug, Clone)]
pub struct StampTool {
    id: ToolId,
    content: String,
}

impl StampTool {
    pub fn new(id: &str, content: impl Into<String>) -> Self {
        Self {
            id: ToolId::intern(id),
            content: content.into(),
        }
    }

    pub fn image() -> Self {
        Self::new("image", "🖼️")
    }

    pub fn text() -> Self {
        Self::new("text", "hello")
    }

    pub fn sticker() -> Self {
        Self::new("sticker", "⭐")
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Tool for StampTool {
    fn id(&self) -> ToolId {
        self.id
    }

    fn on_click(&self, pointer: PointerInfo, ctx: &ToolContext<'_>) {
        ctx.add_node(pointer.x, pointer.y, &self.content);
    }
}

/// The built-in tools: `image`, `text`, `sticker`.
pub fn default_tools() -> Vec<Rc<dyn Tool>> {
    vec![
        Rc::new(StampTool::image()),
        Rc::new(StampTool::text()),
        Rc::new(StampTool::sticker()),
    ]
}

// ─── Closure Tool ────────────────────────────────────────────────────────

type ClickFn = dyn for<'a, 'b> Fn(PointerInfo, &'a ToolContext<'b>);

/// A tool backed by a closure, for ad-hoc behaviors.
pub struct FnTool {
    id: ToolId,
    on_click: Box<ClickFn>,
}

impl FnTool {
    pub fn new(id: &str, on_click: impl Fn(PointerInfo, &ToolContext<'_>) + 'static) -> Self {
        Self {
            id: ToolId::intern(id),
            on_click: Box::new(on_click),
        }
    }
}

impl Tool for FnTool {
    fn id(&self) -> ToolId {
        self.id
    }

    fn on_click(&self, pointer: PointerInfo, ctx: &ToolContext<'_>) {
        (self.on_click)(pointer, ctx);
    }
}

impl std::fmt::Debug for FnTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTool").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn default_tools_have_distinct_ids() {
        let ids: Vec<_> = default_tools().iter().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, vec!["image", "text", "sticker"]);
    }

    #[test]
    fn stamp_places_its_content_at_the_pointer() {
        let surface = MemorySurface::new();
        let canvas = Canvas::new(Box::new(surface.clone()));
        let tool = StampTool::text();

        tool.on_click(PointerInfo::new(4.0, 8.0), &ToolContext::new(&canvas));

        let children = surface.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].1.content, "hello");
        assert_eq!(children[0].1.position.x, 4.0);
        assert_eq!(children[0].1.position.y, 8.0);
    }

    #[test]
    fn tool_without_handler_is_inert() {
        struct Marker;
        impl Tool for Marker {
            fn id(&self) -> ToolId {
                ToolId::intern("marker")
            }
        }

        let surface = MemorySurface::new();
        let canvas = Canvas::new(Box::new(surface.clone()));
        canvas.add_tool(Rc::new(Marker)).unwrap();
        canvas.set_active_tool(ToolId::intern("marker"));

        let click = notes_core::ClickEvent::primary(1.0, 1.0, Some(notes_core::ElementBox::default()));
        assert!(canvas.handle_click(&click));
        assert_eq!(surface.child_count(), 0);
    }

    #[test]
    fn fn_tool_reaches_the_canvas() {
        let canvas = Canvas::new(Box::new(MemorySurface::new()));
        let tool = FnTool::new("switch_back", |_, ctx| {
            ctx.canvas().set_active_tool(ToolId::intern("text"));
        });

        tool.on_click(PointerInfo::default(), &ToolContext::new(&canvas));
        assert_eq!(canvas.active_tool(), Some(ToolId::intern("text")));
    }
}
