//! Node identity and layout ownership.

use std::rc::Rc;

use crate::layout::{Element, LayoutInvalidation, NodeId};

/// Identity of a node plus the invalidation set of the tree that owns it.
#[derive(Clone, Debug)]
pub struct NodeHandle {
    id: NodeId,
    owner: Rc<LayoutInvalidation>,
}

impl NodeHandle {
    pub fn new(id: NodeId, owner: &Rc<LayoutInvalidation>) -> Self {
        Self {
            id,
            owner: owner.clone(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Ask the owner for a layout pass covering this node.
    pub fn set_needs_layout(&self) {
        self.owner.invalidate(self.id);
    }
}

/// A UI primitive that takes part in layout.
pub trait Node {
    fn handle(&self) -> &NodeHandle;

    /// Layout description built from the node's current property values.
    fn element(&self) -> Element;

    fn id(&self) -> NodeId {
        self.handle().id()
    }

    fn set_needs_layout(&self) {
        self.handle().set_needs_layout();
    }
}
