//! Subscriptions and disposal sets.
//!
//! A [`Subscription`] is the handle of one active binding. Disposing it runs
//! its teardown exactly once; dropping it disposes too, so a binding can only
//! stay alive while something owns the handle.
//!
//! A [`DisposalSet`] owns a group of subscriptions and releases them together.

use tracing::debug;

/// Teardown closure run when a subscription is disposed.
pub type Cleanup = Box<dyn FnOnce()>;

/// Handle representing one active binding.
#[must_use = "dropping a Subscription disposes it immediately"]
pub struct Subscription {
    cleanup: Option<Cleanup>,
}

impl Subscription {
    /// Wrap a teardown closure.
    pub fn new<F>(cleanup: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// Run the teardown now. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.cleanup.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// =============================================================================
// DisposalSet
// =============================================================================

/// Owning collection of subscriptions released together.
#[derive(Debug, Default)]
pub struct DisposalSet {
    subscriptions: Vec<Subscription>,
    disposed: bool,
}

impl DisposalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscription.
    ///
    /// Inserting into an already-disposed set disposes the subscription on
    /// the spot.
    pub fn insert(&mut self, mut subscription: Subscription) {
        if self.disposed {
            debug!("subscription added to a disposed set, disposing immediately");
            subscription.dispose();
            return;
        }
        self.subscriptions.push(subscription);
    }

    /// Dispose every subscription, then clear the set.
    ///
    /// Never panics; a second call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let count = self.subscriptions.len();
        for subscription in self.subscriptions.iter_mut() {
            subscription.dispose();
        }
        self.subscriptions.clear();
        debug!(count, "disposal set released");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of live subscriptions held.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Extend<Subscription> for DisposalSet {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        for subscription in iter {
            self.insert(subscription);
        }
    }
}

impl Drop for DisposalSet {
    fn drop(&mut self) {
        self.dispose();
    }
}
