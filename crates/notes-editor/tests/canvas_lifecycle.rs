//! Integration tests: canvas lifecycle (notes-editor).
//!
//! Drives the `Canvas` the way the browser bridge does: register tools,
//! select one, feed clicks, observe nodes on the surface and listener calls.

use notes_core::{ClickEvent, ElementBox, Node, ToolId};
use notes_editor::{Canvas, FnTool, MemorySurface, StampTool, Tool, default_tools};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_canvas() -> (Canvas, MemorySurface) {
    init_logging();
    let surface = MemorySurface::new();
    let canvas = Canvas::with_tools(Box::new(surface.clone()), default_tools()).unwrap();
    (canvas, surface)
}

fn counting_listener() -> (Rc<Cell<u32>>, Rc<dyn Fn()>) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, Rc::new(move || c.set(c.get() + 1)))
}

/// Root element at (0, 0) with a 1px border, like the notes section root.
fn root_click(client_x: f64, client_y: f64) -> ClickEvent {
    ClickEvent::primary(
        client_x,
        client_y,
        Some(ElementBox::at(0.0, 0.0).with_border(1.0, 1.0)),
    )
}

// ─── Registration ────────────────────────────────────────────────────────

#[test]
fn second_registration_of_an_id_fails() {
    let (canvas, _) = make_canvas();
    let result = canvas.add_tool(Rc::new(StampTool::new("image", "replacement")));

    assert!(result.is_err());
    assert_eq!(canvas.tool_ids().len(), 3);

    canvas.set_active_tool(ToolId::intern("image"));
    canvas.handle_click(&root_click(11.0, 11.0));
    assert_eq!(canvas.nodes()[0].1.content, "🖼️");
}

// ─── Nodes ───────────────────────────────────────────────────────────────

#[test]
fn add_node_yields_one_node_and_one_child() {
    let (canvas, surface) = make_canvas();
    let id = canvas.add_node(10.0, 20.0, "x");

    assert_eq!(canvas.node_count(), 1);
    assert_eq!(canvas.node(id), Some(Node::new(10.0, 20.0, "x")));
    assert_eq!(surface.child_count(), 1);
}

// ─── Active tool + listeners ─────────────────────────────────────────────

#[test]
fn each_listener_runs_once_per_selection() {
    let (canvas, _) = make_canvas();
    let (a, la) = counting_listener();
    let (b, lb) = counting_listener();
    let _sa = canvas.subscribe(la);
    let _sb = canvas.subscribe(lb);

    canvas.set_active_tool(ToolId::intern("image"));
    assert_eq!(canvas.active_tool(), Some(ToolId::intern("image")));
    assert_eq!((a.get(), b.get()), (1, 1));

    // Re-selecting the same tool still notifies.
    canvas.set_active_tool(ToolId::intern("image"));
    assert_eq!((a.get(), b.get()), (2, 2));
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let (canvas, _) = make_canvas();
    let (count, listener) = counting_listener();
    let sub = canvas.subscribe(listener);

    canvas.set_active_tool(ToolId::intern("text"));
    sub.unsubscribe();
    canvas.set_active_tool(ToolId::intern("image"));

    assert_eq!(count.get(), 1);
    assert_eq!(canvas.listener_count(), 0);
}

#[test]
fn unsubscribing_one_leaves_the_others() {
    let (canvas, _) = make_canvas();
    let (a, la) = counting_listener();
    let (b, lb) = counting_listener();
    let sa = canvas.subscribe(la);
    let _sb = canvas.subscribe(lb);

    sa.unsubscribe();
    canvas.set_active_tool(ToolId::intern("sticker"));
    assert_eq!((a.get(), b.get()), (0, 1));
}

// ─── Click dispatch ──────────────────────────────────────────────────────

#[test]
fn click_without_active_tool_does_nothing() {
    let (canvas, surface) = make_canvas();
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    canvas
        .add_tool(Rc::new(FnTool::new("probe", move |_, _| c.set(c.get() + 1))))
        .unwrap();

    assert!(!canvas.handle_click(&root_click(50.0, 50.0)));
    assert_eq!(calls.get(), 0);
    assert_eq!(canvas.node_count(), 0);
    assert_eq!(surface.child_count(), 0);
}

#[test]
fn click_with_text_tool_places_hello_at_local_coords() {
    let (canvas, surface) = make_canvas();
    canvas.set_active_tool(ToolId::intern("text"));

    assert!(canvas.handle_click(&root_click(41.0, 31.0)));

    let children = surface.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].1, Node::new(40.0, 30.0, "hello"));
}

#[test]
fn tools_can_switch_the_active_tool() {
    init_logging();
    let canvas = Canvas::new(Box::new(MemorySurface::new()));
    let one_shot: Rc<dyn Tool> = Rc::new(FnTool::new("once", |p, ctx| {
        ctx.add_node(p.x, p.y, "once");
        ctx.canvas().set_active_tool(ToolId::intern("idle"));
    }));
    canvas.add_tool(one_shot).unwrap();
    let (count, listener) = counting_listener();
    let _sub = canvas.subscribe(listener);

    canvas.set_active_tool(ToolId::intern("once"));
    assert!(canvas.handle_click(&root_click(5.0, 5.0)));
    assert!(!canvas.handle_click(&root_click(6.0, 6.0)));

    assert_eq!(canvas.node_count(), 1);
    assert_eq!(canvas.active_tool(), Some(ToolId::intern("idle")));
    assert_eq!(count.get(), 2);
}

// ─── Destroy ─────────────────────────────────────────────────────────────

#[test]
fn destroy_stops_dispatch() {
    let (canvas, _) = make_canvas();
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    canvas
        .add_tool(Rc::new(FnTool::new("probe", move |_, _| c.set(c.get() + 1))))
        .unwrap();
    canvas.set_active_tool(ToolId::intern("probe"));

    assert!(canvas.handle_click(&root_click(2.0, 2.0)));
    canvas.destroy();
    assert!(!canvas.handle_click(&root_click(2.0, 2.0)));

    assert_eq!(calls.get(), 1);
    // State survives teardown.
    assert_eq!(canvas.active_tool(), Some(ToolId::intern("probe")));
    assert!(canvas.has_tool(ToolId::intern("probe")));
}

#[test]
fn nodes_can_still_be_added_after_destroy() {
    let (canvas, surface) = make_canvas();
    canvas.destroy();
    canvas.add_node(1.0, 2.0, "late");
    assert_eq!(surface.child_count(), 1);
}
