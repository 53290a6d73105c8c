//! The renderer seam.
//!
//! The canvas never touches the DOM itself; it hands every created node to a
//! `Surface`. The browser build appends a `<div>` to the root element, native
//! embedders and tests use `MemorySurface`.

use notes_core::{Node, NodeId};
use std::cell::RefCell;
use std::rc::Rc;

/// Something nodes can be drawn onto.
pub trait Surface {
    /// Append a visual element for a newly created node.
    fn append(&mut self, id: NodeId, node: &Node);
}

/// In-memory surface recording appended children.
///
/// Clones share the same child list, so a caller can keep one clone for
/// inspection after handing another to the canvas.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    children: Rc<RefCell<Vec<(NodeId, Node)>>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> Vec<(NodeId, Node)> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }
}

impl Surface for MemorySurface {
    fn append(&mut self, id: NodeId, node: &Node) {
        self.children.borrow_mut().push((id, node.clone()));
    }
}

/// Discards everything. For headless canvases that only track state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn append(&mut self, _id: NodeId, _node: &Node) {}
}
