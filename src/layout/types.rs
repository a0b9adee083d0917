//! Layout Types
//!
//! Sizes, frames and the geometry produced by one layout pass.

use std::collections::BTreeMap;

/// Stable identity of a node in the scene's tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub &'static str);

impl NodeId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Width and height in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Absolute rectangle of a laid-out node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Hit test, right/bottom edges exclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }
}

/// Output of one layout pass: absolute frames keyed by node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub bounds: Size,
    frames: BTreeMap<NodeId, Frame>,
}

impl Geometry {
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            frames: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, id: NodeId, frame: Frame) {
        self.frames.insert(id, frame);
    }

    pub fn frame(&self, id: NodeId) -> Option<Frame> {
        self.frames.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Frame)> + '_ {
        self.frames.iter().map(|(id, frame)| (*id, *frame))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Topmost node containing the point. Later ids in `order` win.
    pub fn hit_test(&self, x: f32, y: f32, order: &[NodeId]) -> Option<NodeId> {
        order
            .iter()
            .rev()
            .copied()
            .find(|id| self.frame(*id).is_some_and(|f| f.contains(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_contains() {
        let frame = Frame::new(10.0, 5.0, 4.0, 2.0);
        assert!(frame.contains(10.0, 5.0));
        assert!(frame.contains(13.5, 6.5));
        assert!(!frame.contains(14.0, 5.0));
        assert!(!frame.contains(9.9, 5.0));
    }

    #[test]
    fn test_hit_test_prefers_last() {
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        let mut geometry = Geometry::new(Size::new(20.0, 20.0));
        geometry.insert(a, Frame::new(0.0, 0.0, 10.0, 10.0));
        geometry.insert(b, Frame::new(5.0, 5.0, 10.0, 10.0));

        assert_eq!(geometry.hit_test(6.0, 6.0, &[a, b]), Some(b));
        assert_eq!(geometry.hit_test(1.0, 1.0, &[a, b]), Some(a));
        assert_eq!(geometry.hit_test(19.0, 1.0, &[a, b]), None);
    }
}
