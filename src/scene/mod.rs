//! Repository show scene.
//!
//! - [`RepoShowContainer`] - node tree, bindings and layout composition
//! - [`bind_state`] / [`bind_action`] - view state in, commands out
//! - [`SceneLifetime`] - one disposal generation per bind
//! - [`Router`] - single-fire dismiss channel and routed data
//! - [`RepositoryShowController`] - host that presents the scene
//!
//! # Data flow
//!
//! ```text
//! presenter ─ViewState─► HotStream ─bind_state─► node properties ─► layout
//!                                                     │
//! interactor ◄─Command── bind_action ◄── button taps ◄┘
//!     │
//!     └─Dismiss─► Router ─once─► DismissHost::dismiss_presentation
//! ```

mod binder;
mod config;
mod container;
mod controller;
mod emitter;
pub mod input;
mod interactor;
mod lifetime;
mod router;

pub use binder::bind_state;
pub use config::SceneMetrics;
pub use container::{
    RepoShowContainer, SceneNodes, CONTAINER, DISMISS_BUTTON, INFORMATION, PIN_BUTTON, PROFILE,
    REPO_INFO,
};
pub use controller::RepositoryShowController;
pub use emitter::bind_action;
pub use input::{gesture_for_event, Gesture};
pub use interactor::{interactor_channel, InteractorInbox, InteractorLogic, InteractorSinks};
pub use lifetime::{LifetimePhase, SceneLifetime};
pub use router::{DismissHost, RepositoryShowDataStore, Router};
