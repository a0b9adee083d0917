//! Scroll container - hosts a nested layout that may outgrow its frame.

use std::rc::Rc;

use crate::layout::{Content, Element, LayoutInvalidation, LayoutSpec, NodeId};
use crate::types::ScrollDirections;

use super::node::NodeHandle;

pub struct ScrollNode {
    handle: NodeHandle,
    directions: ScrollDirections,
}

impl ScrollNode {
    pub fn new(id: NodeId, directions: ScrollDirections, owner: &Rc<LayoutInvalidation>) -> Self {
        Self {
            handle: NodeHandle::new(id, owner),
            directions,
        }
    }

    pub fn id(&self) -> NodeId {
        self.handle.id()
    }

    pub fn directions(&self) -> ScrollDirections {
        self.directions
    }

    /// Element wrapping `content`, scrollable along the configured axes.
    pub fn element(&self, content: LayoutSpec) -> Element {
        Element::new(self.id(), Content::Layout(Box::new(content))).scroll(self.directions)
    }
}
