//! Typed publish/subscribe channel.
//!
//! `EventChannel<T>` is the whole reactivity mechanism of the engine: there
//! is no scheduler, and every notification is delivered synchronously inside
//! the call that caused it.
//!
//! ## Dispatch rules
//!
//! - Listeners run in subscription order.
//! - A listener unsubscribed during a dispatch is not called for the rest of
//!   that dispatch; the dispatch itself carries on safely.
//! - A listener subscribed during a dispatch first hears the next publish.
//! - A panicking listener is not contained; it unwinds through `publish`.
//!
//! Cloning a channel yields another handle to the same subscriber list, so a
//! listener can hold a handle and unsubscribe itself.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use dungeon_deck::events::EventChannel;
//!
//! let channel: EventChannel<u32> = EventChannel::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&total);
//! let id = channel.subscribe(move |n| sink.set(sink.get() + n));
//!
//! channel.publish(&3);
//! channel.publish(&4);
//! assert_eq!(total.get(), 7);
//!
//! assert!(channel.unsubscribe(id));
//! channel.publish(&100);
//! assert_eq!(total.get(), 7);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`EventChannel::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A subscribed callback.
pub type Listener<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
}

/// Synchronous broadcast channel for one event type.
pub struct EventChannel<T> {
    inner: Rc<Subscribers<T>>,
}

impl<T> EventChannel<T> {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Subscribers {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener; it hears every later publish until unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        match listeners.iter().position(|(other, _)| *other == id) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every current listener, in subscription order.
    pub fn publish(&self, event: &T) {
        // Iterate over a copy so listeners may (un)subscribe while we dispatch.
        let snapshot: Vec<(SubscriptionId, Listener<T>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if self.is_subscribed(id) {
                listener(event);
            }
        }
    }

    /// Check whether a subscription is still active.
    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner
            .listeners
            .borrow()
            .iter()
            .any(|(other, _)| *other == id)
    }

    /// Number of active listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Check if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, EventChannel<u32>) {
        (Rc::new(RefCell::new(Vec::new())), EventChannel::new())
    }

    #[test]
    fn test_subscription_order() {
        let (log, channel) = recorder();

        for name in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            channel.subscribe(move |n| log.borrow_mut().push(format!("{name}{n}")));
        }

        channel.publish(&1);
        assert_eq!(*log.borrow(), vec!["a1", "b1", "c1"]);
    }

    #[test]
    fn test_unsubscribe_unknown_id() {
        let channel: EventChannel<u32> = EventChannel::new();
        let id = channel.subscribe(|_| {});

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_self_unsubscribe_during_dispatch() {
        let (log, channel) = recorder();

        let handle = channel.clone();
        let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let own_id = Rc::clone(&slot);
        let first_log = Rc::clone(&log);
        let id = channel.subscribe(move |n| {
            first_log.borrow_mut().push(format!("once{n}"));
            if let Some(id) = own_id.get() {
                handle.unsubscribe(id);
            }
        });
        slot.set(Some(id));

        let second_log = Rc::clone(&log);
        channel.subscribe(move |n| second_log.borrow_mut().push(format!("always{n}")));

        channel.publish(&1);
        channel.publish(&2);

        assert_eq!(*log.borrow(), vec!["once1", "always1", "always2"]);
    }

    #[test]
    fn test_unsubscribe_later_listener_during_dispatch() {
        let (log, channel) = recorder();

        let handle = channel.clone();
        let victim: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let target = Rc::clone(&victim);
        let first_log = Rc::clone(&log);
        channel.subscribe(move |_| {
            first_log.borrow_mut().push("first".to_string());
            if let Some(id) = target.get() {
                handle.unsubscribe(id);
            }
        });

        let second_log = Rc::clone(&log);
        let id = channel.subscribe(move |_| second_log.borrow_mut().push("second".to_string()));
        victim.set(Some(id));

        channel.publish(&0);
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn test_subscribe_during_dispatch_waits_for_next_publish() {
        let (log, channel) = recorder();

        let handle = channel.clone();
        let added = Rc::new(Cell::new(false));
        let outer_log = Rc::clone(&log);
        channel.subscribe(move |_| {
            if !added.get() {
                added.set(true);
                let inner_log = Rc::clone(&outer_log);
                handle.subscribe(move |n| inner_log.borrow_mut().push(format!("late{n}")));
            }
        });

        channel.publish(&1);
        assert!(log.borrow().is_empty());

        channel.publish(&2);
        assert_eq!(*log.borrow(), vec!["late2"]);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let channel: EventChannel<u32> = EventChannel::new();
        let other = channel.clone();

        other.subscribe(|_| {});
        assert_eq!(channel.len(), 1);
    }
}
