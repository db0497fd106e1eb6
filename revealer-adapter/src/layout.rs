use std::collections::HashMap;

use revealer::{Bounds, Layout, NodeId};

/// A [`Layout`] backed by bounds the adapter measured and stored.
#[derive(Clone, Debug, Default)]
pub struct BoundsMap {
    bounds: HashMap<NodeId, Bounds>,
}

impl BoundsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest measurement of `node`, returning the previous one.
    pub fn insert(&mut self, node: NodeId, bounds: Bounds) -> Option<Bounds> {
        self.bounds.insert(node, bounds)
    }

    pub fn remove(&mut self, node: NodeId) -> Option<Bounds> {
        self.bounds.remove(&node)
    }

    pub fn clear(&mut self) {
        self.bounds.clear();
    }
}

impl Layout for BoundsMap {
    fn bounds(&self, node: NodeId) -> Option<Bounds> {
        self.bounds.get(&node).copied()
    }
}
