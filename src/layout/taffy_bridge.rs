//! Taffy Bridge - evaluates a [`LayoutSpec`] with the Taffy layout engine.
//!
//! Every call builds a fresh `TaffyTree`, computes it and reads the frames
//! back out, so nothing computed in one pass can leak into the next.
//!
//! Spec → flexbox mapping:
//!
//! | spec       | container                         | child placement                          |
//! |------------|-----------------------------------|------------------------------------------|
//! | `Inset`    | column, padding = bounded edges   | auto margin on each unbounded edge       |
//! | `Overlay`  | column, stretch                   | child fills, overlay absolute `inset: 0` |
//! | `Relative` | column, justify/align from axes   | intrinsic size                           |
//! | `Stack`    | row/column, gap, justify, align   | element grow/shrink                      |

use std::collections::HashMap;

use taffy::{
    AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    JustifyContent as TaffyJustifyContent, LengthPercentage, LengthPercentageAuto, NodeId as TaffyNodeId,
    Overflow as TaffyOverflow, Position as TaffyPosition, Rect, Size as TaffySize, Style, TaffyTree,
};
use tracing::trace;

use crate::error::LayoutError;
use crate::types::{EdgeInsets, ScrollDirections};

use super::spec::{
    Content, Element, LayoutSpec, RelativePosition, StackAlign, StackDirection, StackJustify,
};
use super::text_measure::{longest_word_width, measure_text_height, string_width};
use super::types::{Frame, Geometry, NodeId, Size};

/// Measure context attached to leaf elements.
enum Measure {
    Fixed(Size),
    Text(Vec<String>),
}

type Tree = TaffyTree<Measure>;

// =============================================================================
// CONVERSIONS
// =============================================================================

fn lp(value: f32) -> LengthPercentage {
    LengthPercentage::Length(value)
}

fn lpa(value: f32) -> LengthPercentageAuto {
    LengthPercentageAuto::Length(value)
}

fn padding_rect(insets: &EdgeInsets) -> Rect<LengthPercentage> {
    Rect {
        top: lp(insets.top.or_zero()),
        right: lp(insets.right.or_zero()),
        bottom: lp(insets.bottom.or_zero()),
        left: lp(insets.left.or_zero()),
    }
}

fn to_taffy_justify(justify: StackJustify) -> TaffyJustifyContent {
    match justify {
        StackJustify::Start => TaffyJustifyContent::FlexStart,
        StackJustify::Center => TaffyJustifyContent::Center,
        StackJustify::End => TaffyJustifyContent::FlexEnd,
        StackJustify::SpaceBetween => TaffyJustifyContent::SpaceBetween,
    }
}

fn to_taffy_align(align: StackAlign) -> TaffyAlignItems {
    match align {
        StackAlign::Start => TaffyAlignItems::FlexStart,
        StackAlign::Center => TaffyAlignItems::Center,
        StackAlign::End => TaffyAlignItems::FlexEnd,
        StackAlign::Stretch => TaffyAlignItems::Stretch,
    }
}

fn relative_justify(position: RelativePosition) -> TaffyJustifyContent {
    match position {
        RelativePosition::Start => TaffyJustifyContent::FlexStart,
        RelativePosition::Center => TaffyJustifyContent::Center,
        RelativePosition::End => TaffyJustifyContent::FlexEnd,
    }
}

fn relative_align(position: RelativePosition) -> TaffyAlignItems {
    match position {
        RelativePosition::Start => TaffyAlignItems::FlexStart,
        RelativePosition::Center => TaffyAlignItems::Center,
        RelativePosition::End => TaffyAlignItems::FlexEnd,
    }
}

fn column() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: TaffyFlexDirection::Column,
        ..Default::default()
    }
}

// =============================================================================
// CHILD PLACEMENT
// =============================================================================

/// How a parent places one child. Merged into the child's style.
#[derive(Clone, Copy, Debug)]
struct Item {
    flex_grow: f32,
    flex_shrink: f32,
    align_self: Option<TaffyAlignSelf>,
    margin: Rect<LengthPercentageAuto>,
    absolute_fill: bool,
    /// The parent fixes the child's height (it does not come from content).
    definite_height: bool,
}

impl Item {
    /// Take all the space the parent offers.
    fn fill() -> Self {
        Self {
            flex_grow: 1.0,
            flex_shrink: 1.0,
            align_self: Some(TaffyAlignSelf::Stretch),
            ..Self::intrinsic()
        }
    }

    /// Keep the child's own size.
    fn intrinsic() -> Self {
        Self {
            flex_grow: 0.0,
            flex_shrink: 1.0,
            align_self: None,
            margin: Rect {
                top: lpa(0.0),
                right: lpa(0.0),
                bottom: lpa(0.0),
                left: lpa(0.0),
            },
            absolute_fill: false,
            definite_height: false,
        }
    }

    /// Absolutely positioned over the parent's whole box.
    fn overlay() -> Self {
        Self {
            absolute_fill: true,
            definite_height: true,
            ..Self::intrinsic()
        }
    }

    fn with_definite_height(mut self, definite: bool) -> Self {
        self.definite_height = definite;
        self
    }

    fn flex(grow: f32, shrink: f32) -> Self {
        Self {
            flex_grow: grow,
            flex_shrink: shrink,
            ..Self::intrinsic()
        }
    }

    /// Placement of the single child of an inset spec.
    ///
    /// Bounded edges on an axis stretch the child; an unbounded edge becomes
    /// an auto margin, which keeps the child's intrinsic extent and pushes it
    /// against the opposite edge. Both unbounded centers it.
    ///
    /// Vertical stretching needs a definite inset height. An inset sized by
    /// its content keeps the child at its intrinsic height and wraps it.
    fn for_inset(insets: &EdgeInsets, definite_height: bool) -> Self {
        let mut item = Self::intrinsic();

        match (insets.top.is_unbounded(), insets.bottom.is_unbounded()) {
            (false, false) if definite_height => {
                item.flex_grow = 1.0;
                item.definite_height = true;
            }
            (false, false) => {}
            (true, false) => item.margin.top = LengthPercentageAuto::Auto,
            (false, true) => item.margin.bottom = LengthPercentageAuto::Auto,
            (true, true) => {
                item.margin.top = LengthPercentageAuto::Auto;
                item.margin.bottom = LengthPercentageAuto::Auto;
            }
        }

        match (insets.left.is_unbounded(), insets.right.is_unbounded()) {
            (false, false) => item.align_self = Some(TaffyAlignSelf::Stretch),
            (true, false) => item.margin.left = LengthPercentageAuto::Auto,
            (false, true) => item.margin.right = LengthPercentageAuto::Auto,
            (true, true) => {
                item.margin.left = LengthPercentageAuto::Auto;
                item.margin.right = LengthPercentageAuto::Auto;
            }
        }

        item
    }

    fn apply(self, style: &mut Style) {
        if self.absolute_fill {
            style.position = TaffyPosition::Absolute;
            style.inset = Rect {
                top: lpa(0.0),
                right: lpa(0.0),
                bottom: lpa(0.0),
                left: lpa(0.0),
            };
            return;
        }
        style.flex_grow = self.flex_grow;
        style.flex_shrink = self.flex_shrink;
        style.align_self = self.align_self;
        style.margin = self.margin;
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

struct Builder {
    tree: Tree,
    elements: HashMap<TaffyNodeId, NodeId>,
}

impl Builder {
    fn build(&mut self, spec: &LayoutSpec, item: Item) -> Result<TaffyNodeId, LayoutError> {
        match spec {
            LayoutSpec::Element(element) => self.build_element(element, item),

            LayoutSpec::Stack(stack) => {
                let mut children = Vec::with_capacity(stack.children.len());
                for child in &stack.children {
                    let child_item = match child {
                        LayoutSpec::Element(el) => Item::flex(el.flex_grow, el.flex_shrink),
                        _ => Item::intrinsic(),
                    };
                    children.push(self.build(child, child_item)?);
                }

                let gap = lp(stack.spacing);
                let mut style = Style {
                    display: Display::Flex,
                    flex_direction: match stack.direction {
                        StackDirection::Vertical => TaffyFlexDirection::Column,
                        StackDirection::Horizontal => TaffyFlexDirection::Row,
                    },
                    gap: TaffySize {
                        width: gap,
                        height: gap,
                    },
                    justify_content: Some(to_taffy_justify(stack.justify)),
                    align_items: Some(to_taffy_align(stack.align)),
                    ..Default::default()
                };
                item.apply(&mut style);
                Ok(self.tree.new_with_children(style, &children)?)
            }

            LayoutSpec::Inset { insets, child } => {
                let child = self.build(child, Item::for_inset(insets, item.definite_height))?;
                let mut style = Style {
                    padding: padding_rect(insets),
                    align_items: Some(TaffyAlignItems::FlexStart),
                    ..column()
                };
                item.apply(&mut style);
                Ok(self.tree.new_with_children(style, &[child])?)
            }

            LayoutSpec::Overlay { child, overlay } => {
                let base = self.build(child, Item::fill().with_definite_height(item.definite_height))?;
                let over = self.build(overlay, Item::overlay())?;
                let mut style = Style {
                    align_items: Some(TaffyAlignItems::Stretch),
                    ..column()
                };
                item.apply(&mut style);
                Ok(self.tree.new_with_children(style, &[base, over])?)
            }

            LayoutSpec::Relative {
                horizontal,
                vertical,
                child,
            } => {
                let child = self.build(child, Item::intrinsic())?;
                let mut style = Style {
                    justify_content: Some(relative_justify(*vertical)),
                    align_items: Some(relative_align(*horizontal)),
                    ..column()
                };
                item.apply(&mut style);
                Ok(self.tree.new_with_children(style, &[child])?)
            }
        }
    }

    fn build_element(&mut self, element: &Element, item: Item) -> Result<TaffyNodeId, LayoutError> {
        let border = lp(element.border);
        let mut style = Style {
            padding: padding_rect(&element.padding),
            border: Rect {
                top: border,
                right: border,
                bottom: border,
                left: border,
            },
            ..column()
        };
        if element.scroll.intersects(ScrollDirections::VERTICAL) {
            style.overflow.y = TaffyOverflow::Scroll;
        }
        if element.scroll.intersects(ScrollDirections::HORIZONTAL) {
            style.overflow.x = TaffyOverflow::Scroll;
        }
        item.apply(&mut style);

        let node = match &element.content {
            Content::Layout(inner) => {
                let inner = self.build(inner, Item::fill().with_definite_height(item.definite_height))?;
                self.tree.new_with_children(style, &[inner])?
            }
            Content::Fixed(size) => self.tree.new_leaf_with_context(style, Measure::Fixed(*size))?,
            Content::Text(paragraphs) => self
                .tree
                .new_leaf_with_context(style, Measure::Text(paragraphs.clone()))?,
        };

        self.elements.insert(node, element.id);
        Ok(node)
    }
}

// =============================================================================
// MEASUREMENT
// =============================================================================

fn measure_paragraphs(paragraphs: &[String], wrap_width: usize) -> TaffySize<f32> {
    let widest = paragraphs.iter().map(|p| string_width(p)).max().unwrap_or(0);
    let width = widest.min(wrap_width.max(1));
    let height: usize = paragraphs
        .iter()
        .map(|p| measure_text_height(p, width.max(1)))
        .sum();

    TaffySize {
        width: width as f32,
        height: height as f32,
    }
}

fn measure(
    known_dimensions: TaffySize<Option<f32>>,
    available_space: TaffySize<AvailableSpace>,
    context: Option<&mut Measure>,
) -> TaffySize<f32> {
    let Some(context) = context else {
        return TaffySize::ZERO;
    };

    let content = match context {
        Measure::Fixed(size) => TaffySize {
            width: size.width,
            height: size.height,
        },
        Measure::Text(paragraphs) => {
            let wrap_width = match (known_dimensions.width, available_space.width) {
                (Some(width), _) => width.max(0.0) as usize,
                (None, AvailableSpace::Definite(width)) => width.max(0.0) as usize,
                (None, AvailableSpace::MinContent) => paragraphs
                    .iter()
                    .map(|p| longest_word_width(p))
                    .max()
                    .unwrap_or(0),
                (None, AvailableSpace::MaxContent) => usize::MAX,
            };
            measure_paragraphs(paragraphs, wrap_width)
        }
    };

    TaffySize {
        width: known_dimensions.width.unwrap_or(content.width),
        height: known_dimensions.height.unwrap_or(content.height),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out `spec` inside `bounds` and return absolute frames for every element.
///
/// Pure: the same spec and bounds always give the same geometry.
pub fn compute_layout(spec: &LayoutSpec, bounds: Size) -> Result<Geometry, LayoutError> {
    let valid = |v: f32| v.is_finite() && v >= 0.0;
    if !valid(bounds.width) || !valid(bounds.height) {
        return Err(LayoutError::InvalidBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let mut builder = Builder {
        tree: TaffyTree::new(),
        elements: HashMap::new(),
    };

    let child = builder.build(spec, Item::fill().with_definite_height(true))?;
    let root = builder.tree.new_with_children(
        Style {
            size: TaffySize {
                width: TaffyDimension::Length(bounds.width),
                height: TaffyDimension::Length(bounds.height),
            },
            align_items: Some(TaffyAlignItems::Stretch),
            ..column()
        },
        &[child],
    )?;

    let available = TaffySize {
        width: AvailableSpace::Definite(bounds.width),
        height: AvailableSpace::Definite(bounds.height),
    };
    builder.tree.compute_layout_with_measure(
        root,
        available,
        |known_dimensions, available_space, _node_id, context, _style| {
            measure(known_dimensions, available_space, context)
        },
    )?;

    let mut geometry = Geometry::new(bounds);
    collect_frames(&builder, root, 0.0, 0.0, &mut geometry)?;
    trace!(
        width = bounds.width,
        height = bounds.height,
        nodes = geometry.len(),
        "layout pass"
    );
    Ok(geometry)
}

/// Walk the computed tree, turning parent-relative locations into absolute
/// frames.
fn collect_frames(
    builder: &Builder,
    node: TaffyNodeId,
    origin_x: f32,
    origin_y: f32,
    geometry: &mut Geometry,
) -> Result<(), LayoutError> {
    let layout = builder.tree.layout(node)?;
    let x = origin_x + layout.location.x;
    let y = origin_y + layout.location.y;

    if let Some(id) = builder.elements.get(&node) {
        geometry.insert(*id, Frame::new(x, y, layout.size.width, layout.size.height));
    }

    for child in builder.tree.children(node)? {
        collect_frames(builder, child, x, y, geometry)?;
    }
    Ok(())
}
