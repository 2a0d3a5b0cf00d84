//! Scoped listener registrations.
//!
//! # Design
//! - A [`Subscription`] is acquired when a listener is registered and released
//!   either explicitly ([`Subscription::cancel`]) or on drop, so every exit path
//!   deregisters.
//! - [`Listeners`] snapshots its entries before notifying, which lets a
//!   listener register or cancel subscriptions while it runs.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Registration handle for a listener. Dropping it deregisters the listener.
#[must_use = "dropping a subscription deregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the action that deregisters a listener.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Subscription with nothing to release.
    pub const fn inert() -> Self {
        Self { release: None }
    }

    /// Whether the listener is still registered through this handle.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Deregister the listener now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

/// Ordered set of listeners interested in values of type `T`.
pub struct Listeners<T: ?Sized> {
    inner: Rc<ListenersInner<T>>,
}

struct ListenersInner<T: ?Sized> {
    next_id: Cell<u64>,
    entries: RefCell<BTreeMap<u64, Listener<T>>>,
}

impl<T: ?Sized + 'static> Listeners<T> {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ListenersInner {
                next_id: Cell::new(0),
                entries: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    /// Register a listener; it stays registered until the returned handle is released.
    pub fn add(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .entries
            .borrow_mut()
            .insert(id, Rc::new(listener));

        let registry: Weak<ListenersInner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = registry.upgrade() {
                inner.entries.borrow_mut().remove(&id);
            }
        })
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every listener registered at the time of the call, in registration order.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self.inner.entries.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(value);
        }
    }
}

impl<T: ?Sized + 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Listeners<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Listeners")
            .field("len", &self.inner.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_subscription_deregisters_listener() {
        let listeners = Listeners::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = Rc::clone(&seen);
            listeners.add(move |value| seen.borrow_mut().push(*value))
        };

        listeners.notify(&1);
        drop(sub);
        listeners.notify(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(listeners.is_empty());
    }

    #[test]
    fn cancel_releases_exactly_once() {
        let released = Rc::new(Cell::new(0));
        let sub = {
            let released = Rc::clone(&released);
            Subscription::new(move || released.set(released.get() + 1))
        };
        assert!(sub.is_active());
        sub.cancel();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let listeners = Listeners::<str>::new();
        let sub = listeners.add(|_| {});
        drop(listeners);
        drop(sub);
    }

    #[test]
    fn listener_can_cancel_itself_during_notify() {
        let listeners = Listeners::<u8>::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));
        let sub = {
            let slot = Rc::clone(&slot);
            let calls = Rc::clone(&calls);
            listeners.add(move |_| {
                calls.set(calls.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(sub);

        listeners.notify(&0);
        listeners.notify(&0);

        assert_eq!(calls.get(), 1);
        assert_eq!(listeners.len(), 0);
    }
}
