//! Active-tool bridge for reactive UI layers.
//!
//! Mirrors the external-store contract of reactive frameworks: a `subscribe`
//! returning a teardown handle and a `snapshot` reading the current value.
//! The canvas may not exist yet (before the root element mounts), in which
//! case subscribing is a no-op and every snapshot is the fallback `None`.

use crate::canvas::Canvas;
use crate::observers::{Listener, Subscription};
use notes_core::ToolId;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct ActiveToolStore {
    canvas: Option<Rc<Canvas>>,
}

impl ActiveToolStore {
    pub fn new(canvas: Option<Rc<Canvas>>) -> Self {
        Self { canvas }
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        match &self.canvas {
            Some(canvas) => canvas.subscribe(listener),
            None => Subscription::detached(),
        }
    }

    /// Current active tool, or `None` without a canvas.
    pub fn snapshot(&self) -> Option<ToolId> {
        self.canvas.as_ref().and_then(|canvas| canvas.active_tool())
    }

    /// Snapshot for non-interactive (initial) renders. Always `None`.
    pub fn server_snapshot(&self) -> Option<ToolId> {
        None
    }
}
