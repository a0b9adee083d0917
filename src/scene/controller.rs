//! Repository show controller - hosts the scene.
//!
//! Owns the container, the router and the inbound view-state stream. The
//! router binding lives in a host-scoped disposal set, so container rebinds
//! never disturb dismissal.
//!
//! # Frame loop
//!
//! ```text
//! pump() ─► bindings write nodes ─► invalidations
//!                                        │
//! layout_if_needed(bounds) ◄─────────────┘  (one pass per batch)
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crossterm::event::Event as CrosstermEvent;
use tracing::{debug, info, warn};

use crate::error::LayoutError;
use crate::layout::{Geometry, Size};
use crate::reactive::{DisposalSet, HotStream, Publisher};
use crate::types::{EdgeInsets, RepositoryId, ViewState};

use super::config::SceneMetrics;
use super::container::{RepoShowContainer, CONTAINER};
use super::input::{gesture_for_event, Gesture};
use super::interactor::InteractorLogic;
use super::router::{DismissHost, RepositoryShowDataStore, Router};

pub struct RepositoryShowController {
    container: RepoShowContainer,
    router: Router,
    state: HotStream<ViewState>,
    interactor: Rc<dyn InteractorLogic>,
    host_bag: RefCell<DisposalSet>,
    presented: Cell<bool>,
    teardowns: Cell<u32>,
    safe_area: Cell<EdgeInsets>,
    bounds: Cell<Option<Size>>,
    geometry: RefCell<Option<Geometry>>,
}

impl RepositoryShowController {
    pub fn new(
        repository_id: RepositoryId,
        metrics: SceneMetrics,
        interactor: Rc<dyn InteractorLogic>,
    ) -> Rc<Self> {
        Rc::new(Self {
            container: RepoShowContainer::new(repository_id, metrics),
            router: Router::new(),
            state: HotStream::new(),
            interactor,
            host_bag: RefCell::new(DisposalSet::new()),
            presented: Cell::new(false),
            teardowns: Cell::new(0),
            safe_area: Cell::new(EdgeInsets::ZERO),
            bounds: Cell::new(None),
            geometry: RefCell::new(None),
        })
    }

    /// Build from the data the previous scene routed here.
    pub fn from_data_store(
        store: Rc<dyn RepositoryShowDataStore>,
        metrics: SceneMetrics,
        interactor: Rc<dyn InteractorLogic>,
    ) -> Rc<Self> {
        let controller = Self::new(store.repository_id(), metrics, interactor);
        controller.router.set_data_store(store);
        controller
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Present the scene: wire the router to this host, then bind the container.
    ///
    /// The router always has exactly one consumer: attaching again replaces
    /// the previous binding.
    pub fn attach(self: &Rc<Self>) {
        let host: Weak<dyn DismissHost> = Rc::downgrade(self) as Weak<dyn DismissHost>;
        {
            let mut host_bag = self.host_bag.borrow_mut();
            if self.presented.get() {
                warn!(
                    live = host_bag.len(),
                    "scene attached while presented, releasing previous router binding"
                );
            }
            host_bag.dispose();
            *host_bag = DisposalSet::new();
            host_bag.insert(self.router.bind(host));
        }
        self.container.bind(&self.state, self.interactor.as_ref());
        self.presented.set(true);
        info!(
            repository_id = self.container.repository_id(),
            "repository show presented"
        );
    }

    /// Re-create the container bindings. Router wiring is untouched.
    pub fn rebind(&self) {
        self.container.rebind(&self.state, self.interactor.as_ref());
    }

    /// Drop every binding, the router's included, without a dismiss.
    pub fn detach(&self) {
        self.host_bag.borrow_mut().dispose();
        self.container.unbind();
        self.presented.set(false);
        debug!(
            repository_id = self.container.repository_id(),
            "repository show detached"
        );
    }

    pub fn is_presented(&self) -> bool {
        self.presented.get()
    }

    /// Number of times the presentation was torn down by a dismiss.
    pub fn teardown_count(&self) -> u32 {
        self.teardowns.get()
    }

    // =========================================================================
    // Streams
    // =========================================================================

    /// Thread-safe handle for whoever produces view state.
    pub fn state_publisher(&self) -> Publisher<ViewState> {
        self.state.publisher()
    }

    pub fn state(&self) -> &HotStream<ViewState> {
        &self.state
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn container(&self) -> &RepoShowContainer {
        &self.container
    }

    /// Deliver everything other threads queued: view state first, then
    /// dismiss signals. Returns the number of values delivered.
    pub fn pump(&self) -> usize {
        self.state.pump() + self.router.pump()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn set_safe_area(&self, safe_area: EdgeInsets) {
        if self.safe_area.replace(safe_area) != safe_area {
            self.container.invalidation().invalidate(CONTAINER);
        }
    }

    pub fn safe_area(&self) -> EdgeInsets {
        self.safe_area.get()
    }

    /// Run a layout pass if anything changed since the last one, including
    /// the bounds themselves.
    pub fn layout_if_needed(&self, bounds: Size) -> Result<Option<Geometry>, LayoutError> {
        if self.bounds.replace(Some(bounds)) != Some(bounds) {
            self.container.set_needs_layout();
        }
        let Some(geometry) = self
            .container
            .layout_if_needed(bounds, &self.safe_area.get())?
        else {
            return Ok(None);
        };
        *self.geometry.borrow_mut() = Some(geometry.clone());
        Ok(Some(geometry))
    }

    /// Geometry of the last layout pass.
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry.borrow().clone()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Turn a terminal event into a button tap. Resizes force a layout pass.
    pub fn handle_event(&self, event: &CrosstermEvent) -> Option<Gesture> {
        if let CrosstermEvent::Resize(..) = event {
            self.container.set_needs_layout();
            return None;
        }

        let gesture = gesture_for_event(event, self.geometry.borrow().as_ref())?;
        let nodes = self.container.nodes();
        match gesture {
            Gesture::TapPin => nodes.pin_button.tap(),
            Gesture::TapDismiss => nodes.dismiss_button.tap(),
        }
        Some(gesture)
    }
}

impl DismissHost for RepositoryShowController {
    fn dismiss_presentation(&self) {
        if !self.presented.replace(false) {
            debug!("dismiss on a scene that is not presented");
            return;
        }
        self.teardowns.set(self.teardowns.get() + 1);
        self.container.unbind();
        info!(
            repository_id = self.container.repository_id(),
            "repository show dismissed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::interactor::interactor_channel;
    use crate::types::Dismiss;

    fn controller() -> (Rc<RepositoryShowController>, crate::scene::InteractorInbox) {
        let (sinks, inbox) = interactor_channel();
        (
            RepositoryShowController::new(42, SceneMetrics::default(), Rc::new(sinks)),
            inbox,
        )
    }

    #[test]
    fn test_attach_binds_container() {
        let (controller, _inbox) = controller();
        assert!(!controller.is_presented());

        controller.attach();
        assert!(controller.is_presented());
        assert_eq!(controller.state().observer_count(), 5);
        assert_eq!(controller.router().dismiss().observer_count(), 1);
    }

    #[test]
    fn test_dismiss_tears_down_once() {
        let (controller, _inbox) = controller();
        controller.attach();

        controller.router().request_dismiss(42);
        controller.router().request_dismiss(42);

        assert!(!controller.is_presented());
        assert_eq!(controller.teardown_count(), 1);
        assert_eq!(controller.state().observer_count(), 0);
    }

    #[test]
    fn test_rebind_keeps_router_binding() {
        let (controller, _inbox) = controller();
        controller.attach();
        controller.rebind();
        controller.rebind();

        assert_eq!(controller.container().generation(), 3);
        assert_eq!(controller.router().dismiss().observer_count(), 1);

        controller.router().dismiss_publisher().send(Dismiss { scene: 42 });
        controller.pump();
        assert_eq!(controller.teardown_count(), 1);
    }

    #[test]
    fn test_reattach_keeps_single_router_consumer() {
        let (controller, _inbox) = controller();
        controller.attach();
        controller.router().request_dismiss(42);
        assert_eq!(controller.teardown_count(), 1);

        controller.attach();
        controller.attach();
        assert_eq!(controller.router().dismiss().observer_count(), 1);
        assert!(controller.is_presented());

        controller.router().request_dismiss(42);
        assert_eq!(controller.teardown_count(), 2);
        assert!(!controller.is_presented());
    }

    #[test]
    fn test_detach_releases_router_binding() {
        let (controller, _inbox) = controller();
        controller.attach();
        controller.detach();

        controller.router().request_dismiss(42);
        assert_eq!(controller.teardown_count(), 0);
        assert_eq!(controller.router().dismiss().observer_count(), 0);
    }

    #[test]
    fn test_layout_reruns_on_bounds_change() {
        let (controller, _inbox) = controller();
        controller.attach();

        let bounds = Size::new(300.0, 800.0);
        assert!(controller.layout_if_needed(bounds).unwrap().is_some());
        assert!(controller.layout_if_needed(bounds).unwrap().is_none());
        assert!(controller
            .layout_if_needed(Size::new(320.0, 800.0))
            .unwrap()
            .is_some());

        controller.set_safe_area(EdgeInsets::new(20.0, 0.0, 0.0, 0.0));
        let geometry = controller
            .layout_if_needed(Size::new(320.0, 800.0))
            .unwrap()
            .unwrap();
        assert_eq!(geometry, controller.geometry().unwrap());
    }

    #[test]
    fn test_data_store_supplies_repository_id() {
        struct Routed;
        impl RepositoryShowDataStore for Routed {
            fn repository_id(&self) -> RepositoryId {
                7
            }
        }

        let (sinks, _inbox) = interactor_channel();
        let controller = RepositoryShowController::from_data_store(
            Rc::new(Routed),
            SceneMetrics::default(),
            Rc::new(sinks),
        );
        assert_eq!(controller.container().repository_id(), 7);
        assert_eq!(
            controller.router().data_store().map(|store| store.repository_id()),
            Some(7)
        );
    }
}
