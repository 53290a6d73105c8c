//! The canvas state container.
//!
//! `Canvas` is the single source of truth for placed nodes and the active
//! tool, and the event binder that turns surface clicks into tool calls.
//!
//! Everything runs on the UI thread. State sits behind `RefCell`/`Cell` and
//! every borrow is released before a tool, listener or surface call, so those
//! callbacks may re-enter the canvas (a tool calls `add_node`, a listener
//! reads `active_tool`).

use crate::observers::{Listener, ObserverList, Subscription};
use crate::surface::Surface;
use crate::tools::{Tool, ToolContext};
use notes_core::{CanvasError, ClickEvent, MouseButton, Node, NodeId, NodeStore, ToolId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub struct Canvas {
    nodes: RefCell<NodeStore>,
    tools: RefCell<HashMap<ToolId, Rc<dyn Tool>>>,
    /// Registration order, for `tool_ids`.
    tool_order: RefCell<Vec<ToolId>>,
    active_tool: Cell<Option<ToolId>>,
    observers: ObserverList,
    surface: RefCell<Box<dyn Surface>>,
    /// Cleared once by `destroy`; every dispatch path checks it.
    alive: Cell<bool>,
}

impl Canvas {
    /// Create an empty canvas drawing onto `surface`.
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            nodes: RefCell::new(NodeStore::new()),
            tools: RefCell::new(HashMap::new()),
            tool_order: RefCell::new(Vec::new()),
            active_tool: Cell::new(None),
            observers: ObserverList::new(),
            surface: RefCell::new(surface),
            alive: Cell::new(true),
        }
    }

    /// Create a canvas and register `tools` in order. Fails on the first
    /// duplicate id.
    pub fn with_tools(
        surface: Box<dyn Surface>,
        tools: impl IntoIterator<Item = Rc<dyn Tool>>,
    ) -> Result<Self, CanvasError> {
        let canvas = Self::new(surface);
        for tool in tools {
            canvas.add_tool(tool)?;
        }
        Ok(canvas)
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Place a node and draw it. No bounds checks, no de-duplication.
    pub fn add_node(&self, x: f64, y: f64, content: &str) -> NodeId {
        let id = NodeId::generate();
        let node = Node::new(x, y, content);
        log::debug!("add node {id} at ({x}, {y})");

        self.surface.borrow_mut().append(id, &node);
        self.nodes.borrow_mut().insert(id, node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes.borrow().get(id).cloned()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> Vec<(NodeId, Node)> {
        self.nodes
            .borrow()
            .iter()
            .map(|(id, node)| (id, node.clone()))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Register a tool. A duplicate id is rejected and leaves the registry
    /// untouched.
    pub fn add_tool(&self, tool: Rc<dyn Tool>) -> Result<(), CanvasError> {
        let id = tool.id();
        let mut tools = self.tools.borrow_mut();
        if tools.contains_key(&id) {
            log::warn!("tool {id} already registered");
            return Err(CanvasError::DuplicateTool(id));
        }
        tools.insert(id, tool);
        self.tool_order.borrow_mut().push(id);
        log::debug!("registered tool {id}");
        Ok(())
    }

    pub fn has_tool(&self, id: ToolId) -> bool {
        self.tools.borrow().contains_key(&id)
    }

    /// Registered tool ids in registration order.
    pub fn tool_ids(&self) -> Vec<ToolId> {
        self.tool_order.borrow().clone()
    }

    /// The selected tool, or `None` when nothing is selected.
    pub fn active_tool(&self) -> Option<ToolId> {
        self.active_tool.get()
    }

    /// Select a tool and notify every listener before returning.
    ///
    /// The id is not checked against the registry; clicks while an unknown
    /// tool is active are ignored.
    pub fn set_active_tool(&self, id: ToolId) {
        self.active_tool.set(Some(id));
        log::debug!("active tool -> {id}");
        self.observers.notify();
    }

    // ─── Subscriptions ───────────────────────────────────────────────────

    /// Observe active-tool changes.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.observers.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.observers.len()
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Dispatch a click on the root surface to the active tool.
    ///
    /// Returns `true` if a tool handled it. Clicks are dropped after
    /// `destroy`, for non-primary buttons, with no (or an empty) active
    /// tool, when the active id has no registered tool, and when the target
    /// is not an element.
    pub fn handle_click(&self, event: &ClickEvent) -> bool {
        if !self.alive.get() {
            log::trace!("click ignored: canvas destroyed");
            return false;
        }
        if event.button != MouseButton::Primary {
            log::trace!("click ignored: button {:?}", event.button);
            return false;
        }
        // An empty id counts as no selection.
        let Some(active) = self.active_tool.get().filter(|id| !id.as_str().is_empty()) else {
            log::trace!("click ignored: no active tool");
            return false;
        };
        let Some(tool) = self.tools.borrow().get(&active).cloned() else {
            log::trace!("click ignored: tool {active} not registered");
            return false;
        };
        let Some(pointer) = event.normalize() else {
            log::trace!("click ignored: target is not an element");
            return false;
        };

        tool.on_click(pointer, &ToolContext::new(self));
        true
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Stop dispatching clicks. Idempotent. Nodes, tools and listeners are
    /// kept.
    pub fn destroy(&self) {
        if self.alive.replace(false) {
            log::debug!("canvas destroyed");
        }
    }

    pub fn is_destroyed(&self) -> bool {
        !self.alive.get()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("nodes", &self.node_count())
            .field("tools", &self.tool_ids())
            .field("active_tool", &self.active_tool())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
