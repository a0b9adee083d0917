//! One-shot guard for events that must take effect at most once.

use std::cell::Cell;

/// Latch that lets exactly one `fire` through.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: Cell<bool>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` on the first call only.
    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}
