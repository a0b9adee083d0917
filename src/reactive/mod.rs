//! Reactive plumbing - hot streams, subscriptions, disposal sets.
//!
//! - [`HotStream`] - multicast push stream owned by the UI context
//! - [`Publisher`] - thread-safe sending handle (streams and command sinks)
//! - [`Observable`] - subscribe + operators (`map`, `distinct_until_changed`)
//! - [`Subscription`] / [`DisposalSet`] - RAII ownership of bindings
//! - [`OneShot`] - at-most-once latch

mod once;
mod stream;
mod subscription;

pub use once::OneShot;
pub use stream::{
    channel, DistinctUntilChanged, HotStream, Map, Observable, Observer, Publisher,
};
pub use subscription::{Cleanup, DisposalSet, Subscription};
