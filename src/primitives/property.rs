//! Node properties.
//!
//! A [`Property`] is the single mutable cell behind one node field. The value
//! lives in a `spark_signals::Signal`, so reactive readers (renderers, deriveds)
//! can track it; the property also counts writes so callers can tell how many
//! mutations actually reached the node.

use std::cell::Cell;

use spark_signals::{signal, Signal};

/// Reactive node field with a write counter.
pub struct Property<T: Clone + PartialEq + 'static> {
    value: Signal<T>,
    writes: Cell<u64>,
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: signal(initial),
            writes: Cell::new(0),
        }
    }

    /// Current value (reactive read).
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Write a value. Every call counts as one mutation.
    pub fn set(&self, value: T) {
        self.writes.set(self.writes.get() + 1);
        self.value.set(value);
    }

    /// Number of writes since construction.
    pub fn writes(&self) -> u64 {
        self.writes.get()
    }

    /// The underlying signal, for reactive consumers.
    pub fn signal(&self) -> Signal<T> {
        self.value.clone()
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .field("writes", &self.writes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_counts_writes() {
        let prop = Property::new(String::new());
        assert_eq!(prop.writes(), 0);

        prop.set("a".to_string());
        prop.set("a".to_string());

        assert_eq!(prop.get(), "a");
        assert_eq!(prop.writes(), 2);
    }

    #[test]
    fn test_property_signal_shares_value() {
        let prop = Property::new(false);
        let sig = prop.signal();

        prop.set(true);
        assert!(sig.get());
    }
}
