//! JavaScript callbacks adapted to the canvas' `Tool` and listener types.
//!
//! Wrapped listeners are cached per JS function so the same function
//! subscribes once. Entries whose listener is gone are pruned on every new
//! subscription and on every `unsubscribe`.

use crate::Shared;
use js_sys::Function;
use notes_core::{PointerInfo, ToolId};
use notes_editor::{Listener, Tool, ToolContext};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

// ─── JS Tool ─────────────────────────────────────────────────────────────

/// A tool whose click handler is a JS function `(x, y, canvas) => void`.
pub struct JsTool {
    id: ToolId,
    on_click: Function,
    /// Weak: the canvas owns this tool. The handler receives the canvas'
    /// shared non-owning JS handle.
    shared: Weak<Shared>,
}

impl JsTool {
    pub fn new(id: &str, on_click: Function, shared: Weak<Shared>) -> Self {
        Self {
            id: ToolId::intern(id),
            on_click,
            shared,
        }
    }
}

impl Tool for JsTool {
    fn id(&self) -> ToolId {
        self.id
    }

    fn on_click(&self, pointer: PointerInfo, _ctx: &ToolContext<'_>) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let canvas = shared.tool_handle();
        let result = self.on_click.call3(
            &JsValue::NULL,
            &JsValue::from_f64(pointer.x),
            &JsValue::from_f64(pointer.y),
            &canvas,
        );
        if let Err(e) = result {
            log::error!("tool {} threw: {e:?}", self.id);
        }
    }
}

// ─── JS listeners ────────────────────────────────────────────────────────

thread_local! {
    /// JS functions already wrapped as listeners. Subscribing the same
    /// function twice must hit the same observer entry.
    static WRAPPED: RefCell<Vec<(Function, Weak<dyn Fn()>)>> = const { RefCell::new(Vec::new()) };
}

/// Wrap a JS function as a listener, reusing the wrapper while the function
/// is still subscribed somewhere.
pub fn js_listener(f: Function) -> Listener {
    WRAPPED.with(|wrapped| {
        let mut wrapped = wrapped.borrow_mut();
        prune_dead(&mut wrapped);

        let target: &JsValue = f.as_ref();
        let existing = wrapped
            .iter()
            .find(|(g, _)| AsRef::<JsValue>::as_ref(g) == target)
            .and_then(|(_, weak)| weak.upgrade());
        if let Some(listener) = existing {
            return listener;
        }

        let callback = f.clone();
        let listener: Listener = Rc::new(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::error!("listener threw: {e:?}");
            }
        });
        wrapped.push((f, Rc::downgrade(&listener)));
        listener
    })
}

/// Drop cache entries whose listener is no longer subscribed anywhere.
pub fn prune_js_listeners() {
    WRAPPED.with(|wrapped| prune_dead(&mut wrapped.borrow_mut()));
}

fn prune_dead<K>(entries: &mut Vec<(K, Weak<dyn Fn()>)>) {
    entries.retain(|(_, weak)| weak.strong_count() > 0);
}
