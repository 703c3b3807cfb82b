//! Broadcast - Last-value replaying fan-out with explicit completion

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// What a subscriber receives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal<T> {
    /// A committed value
    Next(T),
    /// The stream ended; nothing further will be delivered
    Complete,
}

type Subscriber<T> = Rc<dyn Fn(Signal<T>)>;

struct Inner<T> {
    value: Cell<T>,
    completed: Cell<bool>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Subscriber<T>)>>,
}

impl<T> Inner<T> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sid, _)| *sid == id)
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }
}

/// Holds the latest value and pushes it to subscribers synchronously
///
/// A new subscriber receives the current value immediately, then every later
/// value in subscription order. [`Broadcast::complete`] sends
/// [`Signal::Complete`] once and drops all subscribers.
pub struct Broadcast<T: Copy + 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: Copy + fmt::Debug + 'static> fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcast")
            .field("value", &self.inner.value.get())
            .field("completed", &self.inner.completed.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T: Copy + 'static> Broadcast<T> {
    pub fn new(initial: T) -> Self {
        Broadcast {
            inner: Rc::new(Inner {
                value: Cell::new(initial),
                completed: Cell::new(false),
                next_id: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Latest value (kept readable after completion)
    pub fn value(&self) -> T {
        self.inner.value.get()
    }

    pub fn is_completed(&self) -> bool {
        self.inner.completed.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Register a subscriber; it is called with the current value right away
    ///
    /// Subscribing to a completed stream only delivers [`Signal::Complete`].
    pub fn subscribe<F>(&self, subscriber: F) -> Subscription
    where
        F: Fn(Signal<T>) + 'static,
    {
        if self.is_completed() {
            subscriber(Signal::Complete);
            return Subscription::detached();
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let subscriber: Subscriber<T> = Rc::new(subscriber);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::clone(&subscriber)));

        subscriber(Signal::Next(self.value()));

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.unsubscribe(id);
                }
            })),
        }
    }

    /// Store a new value and deliver it to every live subscriber
    ///
    /// Returns `false` (and stores nothing) once the stream has completed.
    pub fn emit(&self, value: T) -> bool {
        if self.is_completed() {
            return false;
        }
        self.inner.value.set(value);

        let snapshot: Vec<(u64, Subscriber<T>)> = self.inner.subscribers.borrow().clone();
        for (id, subscriber) in snapshot {
            // Skip anyone who unsubscribed earlier in this fan-out
            if self.inner.is_subscribed(id) {
                subscriber(Signal::Next(value));
            }
        }
        true
    }

    /// End the stream. Idempotent.
    pub fn complete(&self) {
        if self.inner.completed.replace(true) {
            return;
        }
        let subscribers = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
        for (_, subscriber) in subscribers {
            subscriber(Signal::Complete);
        }
    }
}

/// Keeps a subscription alive; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn detached() -> Self {
        Subscription { cancel: None }
    }

    /// Stop receiving signals
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<Signal<f64>>>>, impl Fn(Signal<f64>) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |signal: Signal<f64>| sink.borrow_mut().push(signal))
    }

    #[test]
    fn test_replays_current_value_on_subscribe() {
        let stream = Broadcast::new(10.0);
        let (log, sink) = recorder();

        let _sub = stream.subscribe(sink);
        assert_eq!(*log.borrow(), vec![Signal::Next(10.0)]);

        stream.emit(7.0);
        assert_eq!(*log.borrow(), vec![Signal::Next(10.0), Signal::Next(7.0)]);
    }

    #[test]
    fn test_delivers_in_subscription_order() {
        let stream = Broadcast::new(0.0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        let _a = stream.subscribe(move |_| first.borrow_mut().push("a"));
        let second = Rc::clone(&order);
        let _b = stream.subscribe(move |_| second.borrow_mut().push("b"));

        order.borrow_mut().clear();
        stream.emit(1.0);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let stream = Broadcast::new(0.0);
        let (log, sink) = recorder();

        let sub = stream.subscribe(sink);
        assert_eq!(stream.subscriber_count(), 1);
        drop(sub);
        assert_eq!(stream.subscriber_count(), 0);

        stream.emit(3.0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_complete_notifies_once_and_stops_delivery() {
        let stream = Broadcast::new(5.0);
        let (log, sink) = recorder();
        let sub = stream.subscribe(sink);

        stream.complete();
        stream.complete();
        assert!(!stream.emit(1.0));

        assert_eq!(*log.borrow(), vec![Signal::Next(5.0), Signal::Complete]);
        assert!((stream.value() - 5.0).abs() < f64::EPSILON);
        sub.unsubscribe();
    }

    #[test]
    fn test_subscribe_after_complete_only_sees_complete() {
        let stream = Broadcast::new(5.0);
        stream.complete();

        let (log, sink) = recorder();
        let _sub = stream.subscribe(sink);
        assert_eq!(*log.borrow(), vec![Signal::Complete]);
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_outlives_stream() {
        let stream = Broadcast::new(1.0);
        let sub = stream.subscribe(|_| {});
        drop(stream);
        sub.unsubscribe();
    }
}
