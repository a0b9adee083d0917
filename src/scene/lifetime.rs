//! Scene lifetime - owns every binding of the current generation.
//!
//! ```text
//! Unbound ──begin_bind──► Bound ──dispose──► Disposed
//!                          ▲  │                 │
//!                          └──┴──begin_bind─────┘   (new generation)
//! ```

use tracing::{debug, info, warn};

use crate::reactive::DisposalSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifetimePhase {
    Unbound,
    Bound,
    Disposed,
}

#[derive(Debug)]
pub struct SceneLifetime {
    phase: LifetimePhase,
    generation: u64,
    bag: DisposalSet,
}

impl Default for SceneLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneLifetime {
    pub fn new() -> Self {
        Self {
            phase: LifetimePhase::Unbound,
            generation: 0,
            bag: DisposalSet::new(),
        }
    }

    /// Open a new generation and return its disposal set.
    ///
    /// The previous generation's set is disposed first, so its bindings
    /// can never deliver alongside the new ones. Calling this while still
    /// bound is allowed but logged: callers should `dispose` first.
    pub fn begin_bind(&mut self) -> &mut DisposalSet {
        if self.phase == LifetimePhase::Bound {
            warn!(
                generation = self.generation,
                live = self.bag.len(),
                "scene rebound without disposal, releasing previous bindings"
            );
        }
        self.bag.dispose();
        self.bag = DisposalSet::new();
        self.generation += 1;
        self.phase = LifetimePhase::Bound;
        info!(generation = self.generation, "scene bound");
        &mut self.bag
    }

    /// Release the current generation. No-op unless bound.
    pub fn dispose(&mut self) {
        if self.phase != LifetimePhase::Bound {
            return;
        }
        self.bag.dispose();
        self.phase = LifetimePhase::Disposed;
        debug!(generation = self.generation, "scene bindings disposed");
    }

    pub fn phase(&self) -> LifetimePhase {
        self.phase
    }

    /// Number of `begin_bind` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Subscriptions held by the current generation.
    pub fn live_subscriptions(&self) -> usize {
        self.bag.len()
    }
}
