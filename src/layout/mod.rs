//! Layout Module
//!
//! Pure layout composition for the scene's node tree.
//!
//! # Architecture
//!
//! 1. Nodes describe themselves as [`Element`]s
//! 2. A scene composes them into an immutable [`LayoutSpec`] expression
//! 3. [`compute_layout`] evaluates the expression with
//!    [Taffy](https://github.com/DioxusLabs/taffy) and returns a [`Geometry`]
//!
//! Mutations mark nodes dirty through [`LayoutInvalidation`]; the owner decides
//! when to run the next pass.
//!
//! # Example
//!
//! ```ignore
//! use repo_show::layout::{compute_layout, Content, Element, LayoutSpec, NodeId, Size};
//! use repo_show::EdgeInsets;
//!
//! let button = Element::new(NodeId::new("button"), Content::Text(vec!["Dismiss".into()]));
//! let spec = LayoutSpec::inset(EdgeInsets::new(30.0, 30.0, 0.0, 0.0), button);
//! let geometry = compute_layout(&spec, Size::new(80.0, 24.0))?;
//! ```

mod invalidation;
mod spec;
mod taffy_bridge;
mod text_measure;
mod types;

pub use invalidation::LayoutInvalidation;
pub use spec::{
    Content, Element, LayoutSpec, RelativePosition, StackAlign, StackDirection, StackJustify,
    StackSpec,
};
pub use taffy_bridge::compute_layout;
pub use text_measure::{
    longest_word_width, measure_text_height, string_width, truncate_text, wrap_text,
};
pub use types::{Frame, Geometry, NodeId, Size};
