//! Data model for the notes canvas.
//!
//! A canvas holds flat, immutable `Node`s placed at surface-local pixel
//! positions. There is no hierarchy: every node is a direct child of the
//! root surface.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Surface-local position in CSS pixels, measured from the root's content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A placed content item: a text box, an image glyph, or a sticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub position: Position,
    pub content: String,
}

impl Node {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            position: Position::new(x, y),
            content: content.into(),
        }
    }
}

/// Normalized pointer coordinates handed to tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInfo {
    pub x: f64,
    pub y: f64,
}

impl PointerInfo {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<PointerInfo> for Position {
    fn from(p: PointerInfo) -> Self {
        Position::new(p.x, p.y)
    }
}

// ─── Node store ──────────────────────────────────────────────────────────

/// Nodes keyed by id. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    order: Vec<NodeId>,
    map: HashMap<NodeId, Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Re-inserting an existing id replaces the node but keeps
    /// its original slot in the iteration order.
    pub fn insert(&mut self, id: NodeId, node: Node) {
        if self.map.insert(id, node).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.map.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.map.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.order
            .iter()
            .filter_map(|id| self.map.get(id).map(|node| (*id, node)))
    }
}
