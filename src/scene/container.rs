//! Repository detail container - node tree, bindings and layout composition.
//!
//! ```text
//! ┌────────────────────────────────┐
//! │ [Dismiss]                      │  relative(start, start) + dismiss insets
//! │                                │
//! │    ┌──── repo_info (scroll) ─┐ │  container insets, bottom unbounded
//! │    │        (profile)        │ │
//! │    │   title / description   │ │
//! │    └─────────────────────────┘ │
//! │                                │
//! │        [     Pin      ]        │  pin insets, top unbounded
//! └────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::error::LayoutError;
use crate::layout::{
    compute_layout, Geometry, LayoutInvalidation, LayoutSpec, NodeId, RelativePosition, Size,
    StackAlign, StackDirection, StackJustify, StackSpec,
};
use crate::primitives::{ButtonNode, InformationNode, Node, ProfileNode, ScrollNode};
use crate::reactive::HotStream;
use crate::types::{EdgeInsets, Inset, RepositoryId, ScrollDirections, TextAlign, ViewState};

use super::binder::bind_state;
use super::config::SceneMetrics;
use super::emitter::bind_action;
use super::interactor::InteractorLogic;
use super::lifetime::{LifetimePhase, SceneLifetime};

pub const CONTAINER: NodeId = NodeId::new("container");
pub const REPO_INFO: NodeId = NodeId::new("repo_info");
pub const PROFILE: NodeId = NodeId::new("profile");
pub const INFORMATION: NodeId = NodeId::new("information");
pub const PIN_BUTTON: NodeId = NodeId::new("pin_button");
pub const DISMISS_BUTTON: NodeId = NodeId::new("dismiss_button");

/// The scene's nodes.
pub struct SceneNodes {
    pub repo_info: ScrollNode,
    pub profile: Rc<ProfileNode>,
    pub information: Rc<InformationNode>,
    pub pin_button: Rc<ButtonNode>,
    pub dismiss_button: Rc<ButtonNode>,
}

impl SceneNodes {
    fn new(metrics: &SceneMetrics, owner: &Rc<LayoutInvalidation>) -> Self {
        Self {
            repo_info: ScrollNode::new(REPO_INFO, ScrollDirections::VERTICAL, owner),
            profile: Rc::new(ProfileNode::new(PROFILE, metrics.profile_scale, owner)),
            information: Rc::new(InformationNode::new(INFORMATION, TextAlign::Center, owner)),
            pin_button: Rc::new(
                ButtonNode::new(PIN_BUTTON, "☆ Pin", owner)
                    .with_selected_title("★ Unpin")
                    .with_content_insets(metrics.button_content_insets)
                    .with_border(metrics.button_border),
            ),
            dismiss_button: Rc::new(
                ButtonNode::new(DISMISS_BUTTON, "Dismiss", owner)
                    .with_content_insets(metrics.button_content_insets)
                    .with_border(metrics.button_border),
            ),
        }
    }
}

pub struct RepoShowContainer {
    repository_id: RepositoryId,
    metrics: SceneMetrics,
    invalidation: Rc<LayoutInvalidation>,
    nodes: SceneNodes,
    lifetime: RefCell<SceneLifetime>,
}

impl RepoShowContainer {
    pub fn new(repository_id: RepositoryId, metrics: SceneMetrics) -> Self {
        let invalidation = Rc::new(LayoutInvalidation::new());
        let nodes = SceneNodes::new(&metrics, &invalidation);
        // Nothing has been laid out yet.
        invalidation.invalidate(CONTAINER);

        Self {
            repository_id,
            metrics,
            invalidation,
            nodes,
            lifetime: RefCell::new(SceneLifetime::new()),
        }
    }

    pub fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    pub fn nodes(&self) -> &SceneNodes {
        &self.nodes
    }

    pub fn metrics(&self) -> &SceneMetrics {
        &self.metrics
    }

    // =========================================================================
    // Lifetime
    // =========================================================================

    /// Bind view state into the nodes and taps into the interactor.
    ///
    /// All subscriptions land in one fresh generation. Any previous
    /// generation is released first.
    pub fn bind(&self, state: &HotStream<ViewState>, interactor: &dyn InteractorLogic) {
        let mut lifetime = self.lifetime.borrow_mut();
        let bag = lifetime.begin_bind();
        bind_state(&self.nodes, state, bag);
        bind_action(&self.nodes, self.repository_id, interactor, bag);
        debug!(
            repository_id = self.repository_id,
            subscriptions = bag.len(),
            "container bindings created"
        );
    }

    /// Dispose the current bindings, then bind again.
    pub fn rebind(&self, state: &HotStream<ViewState>, interactor: &dyn InteractorLogic) {
        self.unbind();
        self.bind(state, interactor);
    }

    /// Release every binding. Safe to call repeatedly.
    pub fn unbind(&self) {
        self.lifetime.borrow_mut().dispose();
    }

    pub fn phase(&self) -> LifetimePhase {
        self.lifetime.borrow().phase()
    }

    pub fn generation(&self) -> u64 {
        self.lifetime.borrow().generation()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.lifetime.borrow().live_subscriptions()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Layout expression for the current node state within `constrained`.
    ///
    /// Pure: reads node properties and metrics, mutates nothing.
    pub fn layout_spec_that_fits(&self, constrained: Size, safe_area: &EdgeInsets) -> LayoutSpec {
        let metrics = &self.metrics;

        let container = LayoutSpec::inset(
            metrics.container_insets(safe_area),
            self.nodes.repo_info.element(self.repo_info_layout_spec()),
        );
        let pin_button = LayoutSpec::inset(
            self.pin_button_insets(constrained),
            self.nodes.pin_button.element(),
        );
        let dismiss_button = LayoutSpec::relative(
            RelativePosition::Start,
            RelativePosition::Start,
            LayoutSpec::inset(
                metrics.dismiss_insets(safe_area),
                self.nodes.dismiss_button.element(),
            ),
        );

        LayoutSpec::overlay(LayoutSpec::overlay(container, pin_button), dismiss_button)
    }

    /// Pin insets for `constrained`. When the horizontal insets leave no room
    /// for the button's label they shrink proportionally, staying explicit.
    fn pin_button_insets(&self, constrained: Size) -> EdgeInsets {
        let mut insets = self.metrics.pin_button_insets;
        let (left, right) = (insets.left.or_zero(), insets.right.or_zero());
        let room = (constrained.width - self.nodes.pin_button.intrinsic_width()).max(0.0);
        if left + right > room {
            insets.left = Inset::Fixed(room * left / (left + right));
            insets.right = Inset::Fixed(room * right / (left + right));
        }
        insets
    }

    fn repo_info_layout_spec(&self) -> LayoutSpec {
        LayoutSpec::stack(StackSpec {
            direction: StackDirection::Vertical,
            spacing: self.metrics.content_spacing,
            justify: StackJustify::Center,
            align: StackAlign::Center,
            children: vec![
                self.nodes.profile.element().into(),
                self.nodes.information.element().flex(1.0, 1.0).into(),
            ],
        })
    }

    /// Run a layout pass for `bounds`. Does not touch the dirty set.
    pub fn compute_layout(&self, bounds: Size, safe_area: &EdgeInsets) -> Result<Geometry, LayoutError> {
        compute_layout(&self.layout_spec_that_fits(bounds, safe_area), bounds)
    }

    /// Run a layout pass only if something was invalidated since the last one.
    ///
    /// Any number of invalidations collapse into a single pass.
    pub fn layout_if_needed(
        &self,
        bounds: Size,
        safe_area: &EdgeInsets,
    ) -> Result<Option<Geometry>, LayoutError> {
        if !self.invalidation.is_pending() {
            return Ok(None);
        }
        let dirty = self.invalidation.take();
        debug!(dirty = dirty.len(), "layout pass");
        self.compute_layout(bounds, safe_area).map(Some)
    }

    /// Force the next `layout_if_needed` to run (bounds or safe area changed).
    pub fn set_needs_layout(&self) {
        self.invalidation.invalidate(CONTAINER);
    }

    pub fn needs_layout(&self) -> bool {
        self.invalidation.is_pending()
    }

    pub fn invalidation(&self) -> &LayoutInvalidation {
        &self.invalidation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Frame;
    use crate::scene::interactor::interactor_channel;

    fn container() -> RepoShowContainer {
        RepoShowContainer::new(42, SceneMetrics::default())
    }

    #[test]
    fn test_content_region_respects_insets() {
        let container = container();
        container.nodes().information.title.set("spark-tui".to_string());

        for safe_top in [0.0, 20.0, 44.0] {
            let safe = EdgeInsets::new(safe_top, 0.0, 0.0, 0.0);
            let geometry = container.compute_layout(Size::new(300.0, 800.0), &safe).unwrap();
            let region = geometry.frame(REPO_INFO).unwrap();

            assert_eq!(region.x, 40.0);
            assert_eq!(region.y, 80.0 + safe_top);
            assert_eq!(region.width, 220.0);
        }
    }

    #[test]
    fn test_pin_button_hugs_bottom() {
        let container = container();
        let geometry = container
            .compute_layout(Size::new(300.0, 800.0), &EdgeInsets::ZERO)
            .unwrap();
        let pin = geometry.frame(PIN_BUTTON).unwrap();

        assert_eq!(pin.x, 80.0);
        assert_eq!(pin.width, 140.0);
        assert_eq!(pin.max_y(), 740.0);
    }

    #[test]
    fn test_narrow_bounds_center_pin_button() {
        let container = container();
        let geometry = container
            .compute_layout(Size::new(150.0, 400.0), &EdgeInsets::ZERO)
            .unwrap();
        let pin = geometry.frame(PIN_BUTTON).unwrap();

        // (150 - 31) / 2 = 59.5, rounded to whole cells by the engine.
        assert_eq!(pin.width, 31.0);
        assert_eq!(pin.x, 60.0);
    }

    #[test]
    fn test_narrow_bounds_keep_pin_insets_explicit() {
        let container = container();
        let spec = container.layout_spec_that_fits(Size::new(150.0, 400.0), &EdgeInsets::ZERO);
        let LayoutSpec::Overlay { child, .. } = spec else {
            panic!("root is an overlay");
        };
        let LayoutSpec::Overlay { overlay, .. } = *child else {
            panic!("content is an overlay");
        };
        let LayoutSpec::Inset { insets, .. } = *overlay else {
            panic!("pin button is inset");
        };

        assert_eq!(insets.left, Inset::Fixed(59.5));
        assert_eq!(insets.right, Inset::Fixed(59.5));
        assert!(insets.top.is_unbounded());
    }

    #[test]
    fn test_dismiss_button_keeps_height_across_safe_areas() {
        let container = container();
        for safe_top in [0.0, 20.0, 100.0] {
            let safe = EdgeInsets::new(safe_top, 0.0, 0.0, 0.0);
            let geometry = container.compute_layout(Size::new(300.0, 800.0), &safe).unwrap();
            let dismiss = geometry.frame(DISMISS_BUTTON).unwrap();

            assert_eq!(dismiss.y, 30.0 + safe_top);
            assert_eq!(dismiss.height, 25.0);
        }
    }

    #[test]
    fn test_dismiss_button_in_top_start_corner() {
        let container = container();
        let safe = EdgeInsets::new(20.0, 0.0, 0.0, 0.0);
        let geometry = container.compute_layout(Size::new(300.0, 800.0), &safe).unwrap();
        let dismiss = geometry.frame(DISMISS_BUTTON).unwrap();

        // "Dismiss" (7) + 2 * 10 content insets + 2 * 2 border.
        assert_eq!(dismiss, Frame::new(30.0, 50.0, 31.0, 25.0));
    }

    #[test]
    fn test_layout_spec_is_pure() {
        let container = container();
        let safe = EdgeInsets::ZERO;
        let before = container.invalidation().requests();

        let bounds = Size::new(300.0, 800.0);
        let first = container.layout_spec_that_fits(bounds, &safe);
        let second = container.layout_spec_that_fits(bounds, &safe);

        assert_eq!(first, second);
        assert_eq!(container.invalidation().requests(), before);
    }

    #[test]
    fn test_layout_if_needed_coalesces() {
        let container = container();
        let bounds = Size::new(300.0, 800.0);
        let safe = EdgeInsets::ZERO;

        assert!(container.layout_if_needed(bounds, &safe).unwrap().is_some());
        assert!(container.layout_if_needed(bounds, &safe).unwrap().is_none());

        container.nodes().information.set_needs_layout();
        container.nodes().profile.set_needs_layout();
        assert!(container.layout_if_needed(bounds, &safe).unwrap().is_some());
        assert!(container.layout_if_needed(bounds, &safe).unwrap().is_none());
    }

    #[test]
    fn test_bind_populates_one_generation() {
        let container = container();
        let state = HotStream::new();
        let (sinks, _inbox) = interactor_channel();

        container.bind(&state, &sinks);
        assert_eq!(container.phase(), LifetimePhase::Bound);
        assert_eq!(container.live_subscriptions(), 7);
        assert_eq!(state.observer_count(), 5);

        container.unbind();
        assert_eq!(container.phase(), LifetimePhase::Disposed);
        assert_eq!(state.observer_count(), 0);
        assert_eq!(container.nodes().pin_button.taps().observer_count(), 0);
    }
}
