//! UI Primitives - the nodes a scene is built from.
//!
//! - [`ProfileNode`] - avatar glyph with a pinned badge
//! - [`InformationNode`] - title + description text block
//! - [`ButtonNode`] - bordered label emitting taps
//! - [`ScrollNode`] - scrollable container for a nested layout
//!
//! # Architecture
//!
//! Every mutable field is a [`Property`] backed by a spark-signals `Signal`.
//! Nodes never lay themselves out: they describe their current state as a
//! layout [`Element`](crate::layout::Element) and report invalidations to the
//! tree that owns them through their [`NodeHandle`].

mod button;
mod information;
mod node;
mod profile;
mod property;
mod scroll;

pub use button::ButtonNode;
pub use information::InformationNode;
pub use node::{Node, NodeHandle};
pub use profile::ProfileNode;
pub use property::Property;
pub use scroll::ScrollNode;
