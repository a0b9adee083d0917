//! Hot streams.
//!
//! A [`HotStream`] pushes values to whoever is subscribed at the moment of
//! delivery. Late subscribers never see past values.
//!
//! Delivery always happens on the thread that owns the stream (the UI
//! context). Other threads push through a [`Publisher`], which queues the value
//! until the owner calls [`HotStream::pump`]:
//!
//! ```text
//! presenter thread ── Publisher::send ──► queue ──► HotStream::pump (UI) ──► observers
//! ```
//!
//! Operators ([`Observable::map`], [`Observable::distinct_until_changed`]) wrap a
//! source and subscribe through to it, so every binding still owns exactly one
//! [`Subscription`] on the underlying stream.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, trace};

use super::subscription::Subscription;

/// Callback invoked for every delivered value.
pub type Observer<T> = Box<dyn FnMut(&T)>;

// =============================================================================
// Publisher (thread-safe producer handle)
// =============================================================================

/// Sending half of a stream or command sink. `Send` when `T: Send`.
///
/// Sending never blocks: values are queued and the call returns immediately.
pub struct Publisher<T> {
    tx: Sender<T>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Publisher<T> {
    /// Queue a value. Returns `false` if the receiving side is gone.
    pub fn send(&self, value: T) -> bool {
        if self.tx.send(value).is_err() {
            debug!("publisher send dropped, receiver disconnected");
            return false;
        }
        true
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}

/// Create a publisher with a plain receiving end (for consumers that live
/// off the UI context, like interactors).
pub fn channel<T>() -> (Publisher<T>, Receiver<T>) {
    let (tx, rx) = mpsc::channel();
    (Publisher { tx }, rx)
}

// =============================================================================
// Observable
// =============================================================================

/// A push source that observers can subscribe to.
pub trait Observable {
    type Item: 'static;

    /// Register an observer. Delivery stops once the returned handle is
    /// disposed or dropped.
    fn subscribe(&self, observer: Observer<Self::Item>) -> Subscription;

    /// Project every value through a pure selector.
    fn map<U, F>(self, selector: F) -> Map<Self, F, U>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> U + 'static,
        U: 'static,
    {
        Map {
            source: self,
            selector: Rc::new(selector),
            _marker: PhantomData,
        }
    }

    /// Drop values equal to the previously delivered one.
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self>
    where
        Self: Sized,
        Self::Item: Clone + PartialEq,
    {
        DistinctUntilChanged { source: self }
    }

    /// Apply every value to a mutator.
    fn bind_to<M>(self, mut mutator: M) -> Subscription
    where
        Self: Sized,
        Self::Item: Clone,
        M: FnMut(Self::Item) + 'static,
    {
        self.subscribe(Box::new(move |value: &Self::Item| mutator(value.clone())))
    }

    /// Forward every value into a publisher. Fire-and-forget.
    fn forward_to(self, sink: Publisher<Self::Item>) -> Subscription
    where
        Self: Sized,
        Self::Item: Clone,
    {
        self.subscribe(Box::new(move |value: &Self::Item| {
            sink.send(value.clone());
        }))
    }
}

// =============================================================================
// HotStream
// =============================================================================

struct StreamCore<T> {
    observers: RefCell<BTreeMap<u64, Rc<RefCell<Observer<T>>>>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<T>>,
    dispatching: Cell<bool>,
    inbox: Receiver<T>,
}

impl<T> StreamCore<T> {
    fn deliver(&self, value: &T) {
        // Snapshot ids so observers added mid-delivery only see later values.
        let ids: Vec<u64> = self.observers.borrow().keys().copied().collect();

        for id in ids {
            // Look each observer up again: one disposed by an earlier observer
            // in this same pass is already gone from the map.
            let observer = self.observers.borrow().get(&id).cloned();
            if let Some(observer) = observer {
                (&mut *observer.borrow_mut())(value);
            }
        }
    }

    fn remove(&self, id: u64) {
        let removed = self.observers.borrow_mut().remove(&id);
        drop(removed);
    }
}

/// Resets the dispatching flag even if an observer panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Multicast stream owned by the UI context.
pub struct HotStream<T> {
    core: Rc<StreamCore<T>>,
    outbox: Sender<T>,
}

impl<T> Clone for HotStream<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            outbox: self.outbox.clone(),
        }
    }
}

impl<T: 'static> Default for HotStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> HotStream<T> {
    pub fn new() -> Self {
        let (outbox, inbox) = mpsc::channel();
        Self {
            core: Rc::new(StreamCore {
                observers: RefCell::new(BTreeMap::new()),
                next_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                inbox,
            }),
            outbox,
        }
    }

    /// Handle for pushing values from any thread.
    pub fn publisher(&self) -> Publisher<T> {
        Publisher {
            tx: self.outbox.clone(),
        }
    }

    /// Deliver a value to current observers, on the calling (UI) thread.
    ///
    /// Values emitted while a delivery is in progress are queued and
    /// delivered afterwards, in order.
    pub fn emit(&self, value: T) {
        self.core.pending.borrow_mut().push_back(value);

        if self.core.dispatching.replace(true) {
            return;
        }
        let _guard = DispatchGuard(&self.core.dispatching);

        loop {
            let next = self.core.pending.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };
            self.core.deliver(&value);
        }
    }

    /// Deliver everything queued by publishers. Returns the number of values
    /// delivered.
    pub fn pump(&self) -> usize {
        let mut delivered = 0;
        while let Ok(value) = self.core.inbox.try_recv() {
            self.emit(value);
            delivered += 1;
        }
        if delivered > 0 {
            trace!(delivered, "stream pumped");
        }
        delivered
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.core.observers.borrow().len()
    }
}

impl<T: 'static> Observable for HotStream<T> {
    type Item = T;

    fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let id = self.core.next_id.get();
        self.core.next_id.set(id + 1);
        self.core
            .observers
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(observer)));

        let core: Weak<StreamCore<T>> = Rc::downgrade(&self.core);
        Subscription::new(move || {
            if let Some(core) = core.upgrade() {
                core.remove(id);
            }
        })
    }
}

// =============================================================================
// Operators
// =============================================================================

/// See [`Observable::map`].
pub struct Map<S, F, U> {
    source: S,
    selector: Rc<F>,
    _marker: PhantomData<fn() -> U>,
}

impl<S, F, U> Observable for Map<S, F, U>
where
    S: Observable,
    F: Fn(&S::Item) -> U + 'static,
    U: 'static,
{
    type Item = U;

    fn subscribe(&self, mut observer: Observer<U>) -> Subscription {
        let selector = self.selector.clone();
        self.source.subscribe(Box::new(move |value: &S::Item| {
            let projected = selector(value);
            observer(&projected);
        }))
    }
}

/// See [`Observable::distinct_until_changed`].
pub struct DistinctUntilChanged<S> {
    source: S,
}

impl<S> Observable for DistinctUntilChanged<S>
where
    S: Observable,
    S::Item: Clone + PartialEq,
{
    type Item = S::Item;

    fn subscribe(&self, mut observer: Observer<S::Item>) -> Subscription {
        // Each subscription tracks its own last value.
        let mut last: Option<S::Item> = None;
        self.source.subscribe(Box::new(move |value: &S::Item| {
            if last.as_ref() == Some(value) {
                return;
            }
            last = Some(value.clone());
            observer(value);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, Observer<T>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Box::new(move |v: &T| sink.borrow_mut().push(v.clone())))
    }

    #[test]
    fn test_hot_stream_no_replay() {
        let stream = HotStream::new();
        stream.emit(1);

        let (seen, observer) = recorder::<i32>();
        let _sub = stream.subscribe(observer);
        stream.emit(2);
        stream.emit(3);

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_dispose_stops_delivery() {
        let stream = HotStream::new();
        let (seen, observer) = recorder::<i32>();
        let mut sub = stream.subscribe(observer);

        stream.emit(1);
        sub.dispose();
        stream.emit(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(stream.observer_count(), 0);
    }

    #[test]
    fn test_publisher_delivers_on_pump() {
        let stream = HotStream::new();
        let (seen, observer) = recorder::<String>();
        let _sub = stream.subscribe(observer);

        let publisher = stream.publisher();
        let handle = std::thread::spawn(move || {
            publisher.send("a".to_string());
            publisher.send("b".to_string());
        });
        handle.join().unwrap();

        assert!(seen.borrow().is_empty());
        assert_eq!(stream.pump(), 2);
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_map_and_distinct() {
        let stream: HotStream<(i32, &'static str)> = HotStream::new();
        let (seen, observer) = recorder::<i32>();
        let _sub = stream
            .clone()
            .map(|v: &(i32, &'static str)| v.0)
            .distinct_until_changed()
            .subscribe(observer);

        stream.emit((1, "a"));
        stream.emit((1, "b"));
        stream.emit((2, "b"));
        stream.emit((1, "c"));

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_reentrant_emit_is_queued_in_order() {
        let stream: HotStream<i32> = HotStream::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner = stream.clone();
        let log = seen.clone();
        let _sub = stream.subscribe(Box::new(move |v: &i32| {
            log.borrow_mut().push(*v);
            if *v == 1 {
                inner.emit(2);
                inner.emit(3);
            }
        }));

        stream.emit(1);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_observer_disposed_mid_delivery_is_skipped() {
        let stream: HotStream<i32> = HotStream::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let killer = victim.clone();
        let _first = stream.subscribe(Box::new(move |_| {
            if let Some(mut sub) = killer.borrow_mut().take() {
                sub.dispose();
            }
        }));

        let (seen, observer) = recorder::<i32>();
        *victim.borrow_mut() = Some(stream.subscribe(observer));

        stream.emit(7);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_channel_send_after_receiver_dropped() {
        let (publisher, receiver) = channel::<u8>();
        assert!(publisher.send(1));
        drop(receiver);
        assert!(!publisher.send(2));
    }
}
