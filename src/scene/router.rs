//! Router - cross-scene navigation and data passing.
//!
//! The dismiss channel is hot and may be pushed from anywhere: the scene's
//! own UI thread via [`Router::request_dismiss`], or a business-logic thread
//! via [`Router::dismiss_publisher`]. Exactly one host consumes it. The host
//! keeps the binding in its own disposal set, so scene rebinds never touch it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use crate::reactive::{HotStream, Observable, OneShot, Publisher, Subscription};
use crate::types::{Dismiss, RepositoryId};

/// Container that presents the scene and can take it down.
pub trait DismissHost {
    /// Tear down the presentation (close/pop).
    fn dismiss_presentation(&self);
}

/// Data handed to the scene by whoever routed to it.
pub trait RepositoryShowDataStore {
    fn repository_id(&self) -> RepositoryId;
}

#[derive(Default)]
pub struct Router {
    dismiss: HotStream<Dismiss>,
    data_store: RefCell<Option<Rc<dyn RepositoryShowDataStore>>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dismiss channel.
    pub fn dismiss(&self) -> &HotStream<Dismiss> {
        &self.dismiss
    }

    /// Thread-safe handle onto the dismiss channel.
    pub fn dismiss_publisher(&self) -> Publisher<Dismiss> {
        self.dismiss.publisher()
    }

    /// Signal dismissal from the UI thread.
    pub fn request_dismiss(&self, scene: RepositoryId) {
        self.dismiss.emit(Dismiss { scene });
    }

    /// Deliver dismiss signals queued by other threads.
    pub fn pump(&self) -> usize {
        self.dismiss.pump()
    }

    /// Attach the single consumer.
    ///
    /// The first signal calls `host.dismiss_presentation()`; later signals are
    /// ignored. The host is held weakly: a host that is already gone is simply
    /// skipped.
    pub fn bind(&self, host: Weak<dyn DismissHost>) -> Subscription {
        let once = OneShot::new();
        self.dismiss.subscribe(Box::new(move |signal: &Dismiss| {
            if !once.fire() {
                debug!(scene = signal.scene, "dismiss already handled, ignoring");
                return;
            }
            match host.upgrade() {
                Some(host) => {
                    info!(scene = signal.scene, "dismissing scene");
                    host.dismiss_presentation();
                }
                None => debug!(scene = signal.scene, "dismiss host already released"),
            }
        }))
    }

    pub fn set_data_store(&self, store: Rc<dyn RepositoryShowDataStore>) {
        *self.data_store.borrow_mut() = Some(store);
    }

    pub fn data_store(&self) -> Option<Rc<dyn RepositoryShowDataStore>> {
        self.data_store.borrow().clone()
    }
}
