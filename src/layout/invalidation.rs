//! Layout invalidation.
//!
//! Nodes mark themselves dirty after a mutation; the owner runs at most one
//! layout pass per batch of invalidations, however many arrived.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use super::types::NodeId;

/// Dirty set shared by every node of one tree.
#[derive(Debug, Default)]
pub struct LayoutInvalidation {
    dirty: RefCell<BTreeSet<NodeId>>,
    requests: Cell<u64>,
}

impl LayoutInvalidation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` as needing layout.
    pub fn invalidate(&self, node: NodeId) {
        self.requests.set(self.requests.get() + 1);
        self.dirty.borrow_mut().insert(node);
    }

    pub fn is_pending(&self) -> bool {
        !self.dirty.borrow().is_empty()
    }

    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.dirty.borrow().contains(&node)
    }

    /// Clear and return the dirty set.
    pub fn take(&self) -> BTreeSet<NodeId> {
        std::mem::take(&mut *self.dirty.borrow_mut())
    }

    /// Total invalidations received, including coalesced ones.
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }
}
