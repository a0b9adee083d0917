//! Profile glyph - the repository owner's avatar with a pinned badge.

use std::rc::Rc;

use crate::layout::{Content, Element, LayoutInvalidation, NodeId, Size};
use crate::types::ProfileScale;

use super::node::{Node, NodeHandle};
use super::property::Property;

const PINNED_BADGE: &str = "★ pinned";

pub struct ProfileNode {
    handle: NodeHandle,
    scale: ProfileScale,
    pub url: Property<Option<String>>,
    /// Adds a badge row under the glyph, so changes need a layout pass.
    pub is_pinned: Property<bool>,
}

impl ProfileNode {
    pub fn new(id: NodeId, scale: ProfileScale, owner: &Rc<LayoutInvalidation>) -> Self {
        Self {
            handle: NodeHandle::new(id, owner),
            scale,
            url: Property::new(None),
            is_pinned: Property::new(false),
        }
    }

    /// Size of the avatar glyph alone.
    pub fn glyph_size(&self) -> Size {
        match self.scale {
            ProfileScale::Small => Size::new(6.0, 3.0),
            ProfileScale::Large => Size::new(12.0, 6.0),
        }
    }

    /// Badge text shown under the glyph, if any.
    pub fn badge(&self) -> Option<&'static str> {
        self.is_pinned.get().then_some(PINNED_BADGE)
    }
}

impl Node for ProfileNode {
    fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    fn element(&self) -> Element {
        let mut size = self.glyph_size();
        if self.badge().is_some() {
            size.height += 1.0;
        }
        Element::new(self.id(), Content::Fixed(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_badge_adds_row() {
        let owner = Rc::new(LayoutInvalidation::new());
        let node = ProfileNode::new(NodeId::new("profile"), ProfileScale::Large, &owner);

        assert_eq!(node.element().content, Content::Fixed(Size::new(12.0, 6.0)));

        node.is_pinned.set(true);
        assert_eq!(node.badge(), Some("★ pinned"));
        assert_eq!(node.element().content, Content::Fixed(Size::new(12.0, 7.0)));
    }

    #[test]
    fn test_set_needs_layout_reaches_owner() {
        let owner = Rc::new(LayoutInvalidation::new());
        let node = ProfileNode::new(NodeId::new("profile"), ProfileScale::Small, &owner);

        node.set_needs_layout();
        assert!(owner.is_dirty(NodeId::new("profile")));
    }
}
