//! # repo-show
//!
//! Reactive binding core for a repository detail scene in the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! node properties and [Taffy](https://github.com/DioxusLabs/taffy) for layout.
//!
//! ## Architecture
//!
//! A presenter pushes [`ViewState`] snapshots; the scene projects each field
//! onto exactly one node property, skipping repeats. Button taps travel the
//! other way as [`Command`]s stamped with the scene's repository id. Every
//! binding is a [`Subscription`](reactive::Subscription) owned by a disposal
//! set, so tearing the scene down stops all delivery at once.
//!
//! ```text
//! ViewState ─► Binder ─► Node properties ─► LayoutSpec ─► Geometry
//! Taps      ─► Event Emitter ─► Command ─► Interactor
//! Dismiss   ─► Router (once) ─► host teardown
//! ```
//!
//! ## Modules
//!
//! - [`types`] - View state, commands, insets, flags
//! - [`reactive`] - Hot streams, subscriptions, disposal sets
//! - [`primitives`] - Profile, information, button and scroll nodes
//! - [`layout`] - Layout expressions and the Taffy evaluation pass
//! - [`scene`] - Container, binder, emitter, router, controller

pub mod error;
pub mod layout;
pub mod primitives;
pub mod reactive;
pub mod scene;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::LayoutError;

pub use layout::{compute_layout, Geometry, LayoutSpec, NodeId, Size};

pub use reactive::{DisposalSet, HotStream, Observable, Publisher, Subscription};

pub use scene::{
    interactor_channel, DismissHost, InteractorLogic, RepoShowContainer,
    RepositoryShowController, RepositoryShowDataStore, Router, SceneMetrics,
};
