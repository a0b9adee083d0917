//! Layout expressions.
//!
//! A [`LayoutSpec`] is an immutable description of how nodes are arranged:
//! stacks, insets, overlays and relative positioning, nested freely. Building
//! one has no side effects; [`compute_layout`](super::compute_layout) turns it
//! into a [`Geometry`](super::Geometry).
//!
//! ```text
//! Overlay
//! ├── child:   Inset(insets) ── Element(scroll) ── Stack[profile, info]
//! └── overlay: Relative(start, start) ── Inset(insets) ── Element(button)
//! ```

use crate::types::{EdgeInsets, ScrollDirections};

use super::types::{NodeId, Size};

// =============================================================================
// Elements (leaves)
// =============================================================================

/// Intrinsic content of an element.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// Fixed intrinsic size.
    Fixed(Size),
    /// Text paragraphs, wrapped to the available width.
    Text(Vec<String>),
    /// A nested layout laid out inside the element.
    Layout(Box<LayoutSpec>),
}

/// A node taking part in layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: NodeId,
    pub content: Content,
    /// Space between the border and the content. Unbounded edges count as 0.
    pub padding: EdgeInsets,
    pub border: f32,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub scroll: ScrollDirections,
}

impl Element {
    pub fn new(id: NodeId, content: Content) -> Self {
        Self {
            id,
            content,
            padding: EdgeInsets::ZERO,
            border: 0.0,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            scroll: ScrollDirections::empty(),
        }
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn border(mut self, width: f32) -> Self {
        self.border = width;
        self
    }

    pub fn flex(mut self, grow: f32, shrink: f32) -> Self {
        self.flex_grow = grow;
        self.flex_shrink = shrink;
        self
    }

    pub fn scroll(mut self, directions: ScrollDirections) -> Self {
        self.scroll = directions;
        self
    }
}

// =============================================================================
// Combinators
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Distribution along the stack direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackJustify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Alignment across the stack direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackAlign {
    Start,
    Center,
    End,
    #[default]
    Stretch,
}

/// Position of a child inside a relative spec, per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelativePosition {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackSpec {
    pub direction: StackDirection,
    pub spacing: f32,
    pub justify: StackJustify,
    pub align: StackAlign,
    pub children: Vec<LayoutSpec>,
}

/// Recursive layout expression.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutSpec {
    Element(Element),
    Stack(StackSpec),
    /// Child inset from the spec's edges. An unbounded edge leaves the child
    /// at its intrinsic extent, pushed toward the opposite edge.
    Inset {
        insets: EdgeInsets,
        child: Box<LayoutSpec>,
    },
    /// `overlay` laid over `child`, sized to `child`.
    Overlay {
        child: Box<LayoutSpec>,
        overlay: Box<LayoutSpec>,
    },
    /// Child at its intrinsic size, positioned per axis.
    Relative {
        horizontal: RelativePosition,
        vertical: RelativePosition,
        child: Box<LayoutSpec>,
    },
}

impl LayoutSpec {
    pub fn inset(insets: EdgeInsets, child: impl Into<LayoutSpec>) -> Self {
        LayoutSpec::Inset {
            insets,
            child: Box::new(child.into()),
        }
    }

    pub fn overlay(child: impl Into<LayoutSpec>, overlay: impl Into<LayoutSpec>) -> Self {
        LayoutSpec::Overlay {
            child: Box::new(child.into()),
            overlay: Box::new(overlay.into()),
        }
    }

    pub fn relative(
        horizontal: RelativePosition,
        vertical: RelativePosition,
        child: impl Into<LayoutSpec>,
    ) -> Self {
        LayoutSpec::Relative {
            horizontal,
            vertical,
            child: Box::new(child.into()),
        }
    }

    pub fn stack(stack: StackSpec) -> Self {
        LayoutSpec::Stack(stack)
    }

    /// Every element id in the expression, depth first.
    pub fn element_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<NodeId>) {
        match self {
            LayoutSpec::Element(element) => {
                ids.push(element.id);
                if let Content::Layout(inner) = &element.content {
                    inner.collect_ids(ids);
                }
            }
            LayoutSpec::Stack(stack) => {
                for child in &stack.children {
                    child.collect_ids(ids);
                }
            }
            LayoutSpec::Inset { child, .. } | LayoutSpec::Relative { child, .. } => {
                child.collect_ids(ids)
            }
            LayoutSpec::Overlay { child, overlay } => {
                child.collect_ids(ids);
                overlay.collect_ids(ids);
            }
        }
    }
}

impl From<Element> for LayoutSpec {
    fn from(element: Element) -> Self {
        LayoutSpec::Element(element)
    }
}

impl From<StackSpec> for LayoutSpec {
    fn from(stack: StackSpec) -> Self {
        LayoutSpec::Stack(stack)
    }
}
