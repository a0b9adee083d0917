//! Input - crossterm events onto scene gestures.
//!
//! Keys: `p` toggles the pin, `d` / `Esc` dismiss. A left click hits whichever
//! button frame contains it in the last computed geometry.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use crate::layout::{Geometry, NodeId};

use super::container::{DISMISS_BUTTON, PIN_BUTTON};

/// A discrete user intent on the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    TapPin,
    TapDismiss,
}

/// Hit-test order, bottom to top. Later entries win on overlap.
const TAP_TARGETS: [NodeId; 2] = [PIN_BUTTON, DISMISS_BUTTON];

/// Map a terminal event onto a gesture, if it is one.
///
/// Mouse clicks need `geometry`; without a layout nothing can be hit.
pub fn gesture_for_event(event: &CrosstermEvent, geometry: Option<&Geometry>) -> Option<Gesture> {
    match event {
        CrosstermEvent::Key(key) => gesture_for_key(key),
        CrosstermEvent::Mouse(mouse) => geometry.and_then(|g| gesture_for_mouse(mouse, g)),
        _ => None,
    }
}

fn gesture_for_key(key: &CrosstermKeyEvent) -> Option<Gesture> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Gesture::TapPin),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Esc => Some(Gesture::TapDismiss),
        _ => None,
    }
}

fn gesture_for_mouse(mouse: &CrosstermMouseEvent, geometry: &Geometry) -> Option<Gesture> {
    if mouse.kind != MouseEventKind::Down(CrosstermMouseButton::Left) {
        return None;
    }
    // Cell centers, so a click on a frame's last column still lands inside.
    let x = f32::from(mouse.column) + 0.5;
    let y = f32::from(mouse.row) + 0.5;

    match geometry.hit_test(x, y, &TAP_TARGETS)? {
        id if id == PIN_BUTTON => Some(Gesture::TapPin),
        id if id == DISMISS_BUTTON => Some(Gesture::TapDismiss),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Frame, Size};
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(CrosstermKeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind: MouseEventKind::Down(CrosstermMouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn geometry() -> Geometry {
        let mut geometry = Geometry::new(Size::new(80.0, 24.0));
        geometry.insert(PIN_BUTTON, Frame::new(10.0, 20.0, 20.0, 3.0));
        geometry.insert(DISMISS_BUTTON, Frame::new(2.0, 1.0, 9.0, 3.0));
        geometry
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            gesture_for_event(&key(KeyCode::Char('p'), KeyEventKind::Press), None),
            Some(Gesture::TapPin)
        );
        assert_eq!(
            gesture_for_event(&key(KeyCode::Esc, KeyEventKind::Press), None),
            Some(Gesture::TapDismiss)
        );
        assert_eq!(
            gesture_for_event(&key(KeyCode::Char('p'), KeyEventKind::Release), None),
            None
        );
        assert_eq!(
            gesture_for_event(&key(KeyCode::Char('x'), KeyEventKind::Press), None),
            None
        );
    }

    #[test]
    fn test_click_hits_buttons() {
        let geometry = geometry();
        assert_eq!(
            gesture_for_event(&click(15, 21), Some(&geometry)),
            Some(Gesture::TapPin)
        );
        assert_eq!(
            gesture_for_event(&click(2, 1), Some(&geometry)),
            Some(Gesture::TapDismiss)
        );
        assert_eq!(gesture_for_event(&click(50, 10), Some(&geometry)), None);
    }

    #[test]
    fn test_click_without_geometry_is_ignored() {
        assert_eq!(gesture_for_event(&click(15, 21), None), None);
    }
}
