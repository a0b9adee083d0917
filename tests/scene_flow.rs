//! End-to-end scene flow: presenter → nodes → layout, taps → interactor,
//! dismiss → host.

use std::rc::Rc;
use std::sync::mpsc::TryRecvError;
use std::thread;

use repo_show::layout::Size;
use repo_show::primitives::Node;
use repo_show::scene::{
    interactor_channel, InteractorInbox, LifetimePhase, RepoShowContainer,
    RepositoryShowController, SceneMetrics, INFORMATION, PROFILE, REPO_INFO,
};
use repo_show::{Command, Dismiss, EdgeInsets, HotStream, ViewState};

fn drain(rx: &std::sync::mpsc::Receiver<Command>) -> Vec<Command> {
    let mut commands = Vec::new();
    while let Ok(command) = rx.try_recv() {
        commands.push(command);
    }
    commands
}

fn presented(id: i64) -> (Rc<RepositoryShowController>, InteractorInbox) {
    let (sinks, inbox) = interactor_channel();
    let controller = RepositoryShowController::new(id, SceneMetrics::default(), Rc::new(sinks));
    controller.attach();
    (controller, inbox)
}

// =============================================================================
// Binder
// =============================================================================

#[test]
fn test_end_to_end_pin_toggle() {
    let (controller, _inbox) = presented(42);
    let nodes = controller.container().nodes();

    let state = controller.state();
    state.emit(ViewState::new("A", "first").pinned(false));
    state.emit(ViewState::new("A", "first").pinned(true));
    state.emit(ViewState::new("A", "first").pinned(true));

    assert_eq!(nodes.information.title.writes(), 1);
    assert_eq!(nodes.information.title.get(), "A");
    assert_eq!(nodes.profile.is_pinned.writes(), 2);
    assert!(nodes.profile.is_pinned.get());
    assert!(nodes.pin_button.is_selected());
}

#[test]
fn test_equal_snapshots_write_nothing() {
    let (controller, _inbox) = presented(42);
    let nodes = controller.container().nodes();

    let snapshot = ViewState::new("spark", "signals").with_profile_url("avatar://1");
    for _ in 0..5 {
        controller.state().emit(snapshot.clone());
    }

    assert_eq!(nodes.profile.url.writes(), 1);
    assert_eq!(nodes.information.title.writes(), 1);
    assert_eq!(nodes.information.subtitle.writes(), 1);
    assert_eq!(nodes.profile.is_pinned.writes(), 1);
}

#[test]
fn test_changed_field_invalidates_its_node() {
    let (controller, _inbox) = presented(42);
    let container = controller.container();
    controller.layout_if_needed(Size::new(300.0, 800.0)).unwrap();
    assert!(!container.needs_layout());

    controller.state().emit(ViewState::new("A", "x"));
    assert!(container.invalidation().is_dirty(INFORMATION));
    assert!(container.invalidation().is_dirty(PROFILE));
    controller.layout_if_needed(Size::new(300.0, 800.0)).unwrap();

    controller.state().emit(ViewState::new("B", "x"));
    assert!(container.invalidation().is_dirty(INFORMATION));
    assert!(!container.invalidation().is_dirty(PROFILE));
}

#[test]
fn test_presenter_thread_delivers_on_pump() {
    let (controller, _inbox) = presented(42);
    let publisher = controller.state_publisher();

    thread::spawn(move || {
        publisher.send(ViewState::new("remote", "pushed from a worker"));
    })
    .join()
    .unwrap();

    let nodes = controller.container().nodes();
    assert_eq!(nodes.information.title.writes(), 0);
    assert_eq!(controller.pump(), 1);
    assert_eq!(nodes.information.title.get(), "remote");
}

// =============================================================================
// Lifetime
// =============================================================================

#[test]
fn test_rebind_isolation() {
    let container = RepoShowContainer::new(42, SceneMetrics::default());
    let state = HotStream::new();
    let (sinks, inbox) = interactor_channel();

    container.bind(&state, &sinks);
    container.rebind(&state, &sinks);
    assert_eq!(container.generation(), 2);

    state.emit(ViewState::new("once", ""));
    assert_eq!(container.nodes().information.title.writes(), 1);

    container.nodes().pin_button.tap();
    assert_eq!(drain(&inbox.pin), vec![Command::new(42)]);
}

#[test]
fn test_no_delivery_after_unbind() {
    let container = RepoShowContainer::new(42, SceneMetrics::default());
    let state = HotStream::new();
    let (sinks, inbox) = interactor_channel();

    container.bind(&state, &sinks);
    container.unbind();
    container.unbind();
    assert_eq!(container.phase(), LifetimePhase::Disposed);

    state.emit(ViewState::new("late", ""));
    container.nodes().pin_button.tap();

    assert_eq!(container.nodes().information.title.writes(), 0);
    assert_eq!(inbox.pin.try_recv(), Err(TryRecvError::Empty));
}

// =============================================================================
// Event emitter
// =============================================================================

#[test]
fn test_taps_are_stamped_with_scene_id() {
    let (controller, inbox) = presented(42);
    let nodes = controller.container().nodes();

    nodes.pin_button.tap();
    nodes.pin_button.tap();
    nodes.dismiss_button.tap();

    assert_eq!(drain(&inbox.pin), vec![Command::new(42), Command::new(42)]);
    assert_eq!(drain(&inbox.dismiss), vec![Command::new(42)]);
}

#[test]
fn test_interactor_consumes_on_another_thread() {
    let (controller, inbox) = presented(42);
    let worker = thread::spawn(move || inbox.pin.iter().take(3).collect::<Vec<_>>());

    for _ in 0..3 {
        controller.container().nodes().pin_button.tap();
    }

    assert_eq!(worker.join().unwrap(), vec![Command::new(42); 3]);
}

// =============================================================================
// Router
// =============================================================================

#[test]
fn test_dismiss_round_trip_fires_once() {
    let (controller, inbox) = presented(42);
    let dismiss = controller.router().dismiss_publisher();

    controller.container().nodes().dismiss_button.tap();

    // Business logic answers the dismiss command from its own thread, twice.
    thread::spawn(move || {
        for command in inbox.dismiss.try_iter() {
            dismiss.send(Dismiss {
                scene: command.repository_id,
            });
            dismiss.send(Dismiss {
                scene: command.repository_id,
            });
        }
    })
    .join()
    .unwrap();

    assert!(controller.is_presented());
    assert_eq!(controller.pump(), 2);
    assert!(!controller.is_presented());
    assert_eq!(controller.teardown_count(), 1);
    assert_eq!(controller.container().phase(), LifetimePhase::Disposed);
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_content_region_tracks_safe_area() {
    let (controller, _inbox) = presented(42);
    controller.state().emit(ViewState::new("spark-tui", "Reactive terminal UI"));

    for safe_top in [0.0, 20.0, 44.0] {
        controller.set_safe_area(EdgeInsets::new(safe_top, 0.0, 0.0, 0.0));
        let geometry = controller
            .layout_if_needed(Size::new(300.0, 800.0))
            .unwrap()
            .unwrap();
        let region = geometry.frame(REPO_INFO).unwrap();

        assert_eq!(region.x, 40.0);
        assert_eq!(region.y, 80.0 + safe_top);
    }
}

#[test]
fn test_layout_spec_reads_without_writing() {
    let (controller, _inbox) = presented(42);
    controller.state().emit(ViewState::new("A", "b").pinned(true));
    let container = controller.container();
    let writes = container.nodes().profile.is_pinned.writes();

    let bounds = Size::new(300.0, 800.0);
    let spec = container.layout_spec_that_fits(bounds, &EdgeInsets::ZERO);
    assert_eq!(spec, container.layout_spec_that_fits(bounds, &EdgeInsets::ZERO));
    assert_eq!(container.nodes().profile.is_pinned.writes(), writes);
    assert_eq!(
        spec.element_ids().first().copied(),
        Some(container.nodes().repo_info.id())
    );
    assert_eq!(container.nodes().profile.id(), PROFILE);
}
