//! WASM bridge for the notes canvas — binds the Rust state container to a
//! DOM root element.
//!
//! Compiled via `wasm-pack build --target web`. The embedding page creates a
//! `NotesCanvas` on a mounted element, selects tools from its toolbar, and
//! calls `destroy()` when the element unmounts.

mod dom;
mod js;
mod logger;

use dom::{ClickBinding, DomSurface};
use js::{JsTool, js_listener, prune_js_listeners};
use notes_core::{CanvasConfig, Node, NodeId, ToolId};
use notes_editor::{ActiveToolStore, Canvas, Subscription, Tool, default_tools};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// State behind every JS handle to the same canvas.
pub(crate) struct Shared {
    pub(crate) canvas: Rc<Canvas>,
    binding: RefCell<Option<ClickBinding>>,
    /// Non-owning handle passed to JS tools, created on first use and reused
    /// for every click.
    tool_handle: RefCell<Option<JsValue>>,
}

impl Shared {
    fn new(canvas: Canvas) -> Self {
        Self {
            canvas: Rc::new(canvas),
            binding: RefCell::new(None),
            tool_handle: RefCell::new(None),
        }
    }

    /// The handle JS tools receive as their `canvas` argument.
    pub(crate) fn tool_handle(self: &Rc<Self>) -> JsValue {
        if let Some(handle) = self.tool_handle.borrow().as_ref() {
            return handle.clone();
        }
        let handle = JsValue::from(NotesCanvas::borrowed(Rc::downgrade(self)));
        *self.tool_handle.borrow_mut() = Some(handle.clone());
        handle
    }
}

/// JS-facing canvas handle.
///
/// The handle returned by the constructor owns the canvas; freeing it (or
/// calling `free()` from JS) drops the canvas once nothing else holds it.
/// The handle passed to JS tools is borrowed: it never keeps the canvas
/// alive, and once the canvas is gone its methods do nothing and report
/// empty values.
///
/// All methods take `&self` so tools and listeners may call back into the
/// canvas while a click or a tool change is being dispatched.
#[wasm_bindgen]
pub struct NotesCanvas {
    shared: Weak<Shared>,
    /// `Some` only for the owning handle.
    owner: Option<Rc<Shared>>,
}

#[wasm_bindgen]
impl NotesCanvas {
    /// Create a canvas on `root`. `config_json` is an optional
    /// `CanvasConfig` object as JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, config_json: Option<String>) -> Result<NotesCanvas, JsValue> {
        console_error_panic_hook_setup();

        let config = CanvasConfig::from_json(config_json.as_deref().unwrap_or_default())
            .map_err(JsError::from)?;
        logger::init(config.level_filter());

        let surface = DomSurface::new(root.clone(), config.node_class.clone())?;
        let tools: Vec<Rc<dyn Tool>> = if config.default_tools {
            default_tools()
        } else {
            Vec::new()
        };
        let canvas = Canvas::with_tools(Box::new(surface), tools).map_err(JsError::from)?;
        // Nobody can be subscribed yet.
        if let Some(initial) = &config.initial_tool {
            canvas.set_active_tool(ToolId::intern(initial));
        }

        let shared = Rc::new(Shared::new(canvas));
        let binding = ClickBinding::attach(&root, Rc::downgrade(&shared))?;
        *shared.binding.borrow_mut() = Some(binding);

        log::info!("notes canvas ready ({} tools)", shared.canvas.tool_ids().len());
        Ok(Self::owning(shared))
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Place a node at surface-local coordinates. Returns its id, or `null`
    /// when the canvas is gone.
    pub fn add_node(&self, x: f64, y: f64, content: &str) -> Option<String> {
        self.with_shared(|shared| shared.canvas.add_node(x, y, content).to_string())
    }

    pub fn node_count(&self) -> usize {
        self.with_shared(|shared| shared.canvas.node_count())
            .unwrap_or_default()
    }

    /// All nodes as JSON: `[{"id":"note_0","position":{"x":..,"y":..},"content":".."}]`.
    pub fn nodes_json(&self) -> Result<String, JsError> {
        #[derive(Serialize)]
        struct Entry {
            id: NodeId,
            #[serde(flatten)]
            node: Node,
        }
        let entries: Vec<Entry> = self
            .with_shared(|shared| shared.canvas.nodes())
            .unwrap_or_default()
            .into_iter()
            .map(|(id, node)| Entry { id, node })
            .collect();
        Ok(serde_json::to_string(&entries)?)
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Register a JS tool. `on_click` is called as `(x, y, canvas)`. Throws
    /// if the id is taken.
    pub fn add_tool(&self, id: &str, on_click: js_sys::Function) -> Result<(), JsError> {
        let Some(shared) = self.shared.upgrade() else {
            return Ok(());
        };
        let tool = JsTool::new(id, on_click, Rc::downgrade(&shared));
        shared.canvas.add_tool(Rc::new(tool))?;
        Ok(())
    }

    /// Registered tool ids, in registration order.
    pub fn tool_ids(&self) -> Vec<String> {
        self.with_shared(|shared| {
            shared
                .canvas
                .tool_ids()
                .iter()
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
    }

    /// The active tool id, or `null` when none is selected.
    pub fn get_active_tool(&self) -> Option<String> {
        self.with_shared(|shared| shared.canvas.active_tool())
            .flatten()
            .map(|id| id.to_string())
    }

    /// Select a tool (unvalidated) and notify listeners before returning.
    ///
    /// Ids are interned for the lifetime of the page, so pass tool names,
    /// not arbitrary user input.
    pub fn set_active_tool(&self, id: &str) {
        self.with_shared(|shared| shared.canvas.set_active_tool(ToolId::intern(id)));
    }

    // ─── Subscriptions ───────────────────────────────────────────────────

    /// Call `listener()` whenever the active tool changes.
    pub fn subscribe(&self, listener: js_sys::Function) -> NotesSubscription {
        let inner = self
            .with_shared(|shared| shared.canvas.subscribe(js_listener(listener)))
            .unwrap_or_else(Subscription::detached);
        NotesSubscription { inner }
    }

    /// External-store view of the active tool for reactive UI code.
    pub fn active_tool_bridge(&self) -> ActiveToolBridge {
        ActiveToolBridge {
            store: ActiveToolStore::new(self.with_shared(|shared| shared.canvas.clone())),
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Stop handling clicks and detach the DOM listener. Idempotent.
    pub fn destroy(&self) {
        self.with_shared(|shared| {
            shared.canvas.destroy();
            // Dropping the binding removes the listener.
            shared.binding.borrow_mut().take();
        });
    }

    /// `true` after `destroy`, and for a borrowed handle whose canvas is gone.
    pub fn is_destroyed(&self) -> bool {
        self.with_shared(|shared| shared.canvas.is_destroyed())
            .unwrap_or(true)
    }
}

impl NotesCanvas {
    fn owning(shared: Rc<Shared>) -> Self {
        Self {
            shared: Rc::downgrade(&shared),
            owner: Some(shared),
        }
    }

    pub(crate) fn borrowed(shared: Weak<Shared>) -> Self {
        Self {
            shared,
            owner: None,
        }
    }

    /// Run `f` against the canvas if it still exists.
    fn with_shared<R>(&self, f: impl FnOnce(&Rc<Shared>) -> R) -> Option<R> {
        self.shared.upgrade().map(|shared| f(&shared))
    }
}

/// Teardown handle returned by `subscribe`.
#[wasm_bindgen]
pub struct NotesSubscription {
    inner: Subscription,
}

#[wasm_bindgen]
impl NotesSubscription {
    pub fn unsubscribe(&self) {
        self.inner.unsubscribe();
        prune_js_listeners();
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

/// Subscribe/snapshot pair over the active tool. Constructed without a
/// canvas it is inert and always reports `null`, for renders before the
/// root element is mounted.
#[wasm_bindgen]
#[derive(Default)]
pub struct ActiveToolBridge {
    store: ActiveToolStore,
}

#[wasm_bindgen]
impl ActiveToolBridge {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: js_sys::Function) -> NotesSubscription {
        NotesSubscription {
            inner: self.store.subscribe(js_listener(listener)),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.store.snapshot().map(|id| id.to_string())
    }

    pub fn server_snapshot(&self) -> Option<String> {
        self.store.server_snapshot().map(|id| id.to_string())
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("notes WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
