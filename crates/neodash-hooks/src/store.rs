//! Key-value store abstraction consumed by [`crate::PersistedValue`].
//!
//! # Design
//! - Stores are injected, never looked up globally, so tests and the browser
//!   binding can supply isolated instances.
//! - Values cross the boundary as already-serialized text; encoding lives in
//!   the binding, not the store.
//! - Change notifications describe writes made by *other* execution contexts
//!   and are only delivered for the durable namespace.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::subscription::{Listeners, Subscription};

/// Storage scope backing a binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Survives restarts and is shared by every same-origin context.
    #[default]
    Durable,
    /// Cleared when the session ends and private to one context.
    Session,
}

impl Namespace {
    /// Stable lowercase label for logs and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Session => "session",
        }
    }

    /// Whether writes from one context are announced to the others.
    #[must_use]
    pub const fn broadcasts_changes(self) -> bool {
        matches!(self, Self::Durable)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Change made to a store entry by another execution context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreChange {
    /// Key that changed.
    pub key: String,
    /// New serialized value, or `None` when the entry was removed.
    pub new_value: Option<String>,
}

/// Listener invoked with changes from other contexts.
pub type ChangeListener = Box<dyn Fn(&StoreChange)>;

/// Text key-value store with cross-context change notifications.
pub trait KeyValueStore {
    /// Namespace this store writes to.
    fn namespace(&self) -> Namespace;

    /// Read the serialized entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the serialized entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the write (quota, unavailable).
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the entry for `key`; missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Register for changes made by other contexts. Session stores return an
    /// inert subscription.
    fn subscribe(&self, listener: ChangeListener) -> Subscription;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn namespace(&self) -> Namespace {
        (**self).namespace()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn subscribe(&self, listener: ChangeListener) -> Subscription {
        (**self).subscribe(listener)
    }
}

#[derive(Debug)]
struct Notification {
    origin: u64,
    change: StoreChange,
}

struct Backing {
    namespace: Namespace,
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Cell<Option<usize>>,
    unavailable: Cell<bool>,
    next_context: Cell<u64>,
    listeners: Listeners<Notification>,
}

/// In-memory store shared by one or more simulated execution contexts.
///
/// Each handle is one context. [`MemoryStore::fork_context`] models a second
/// window on the same origin: durable writes made through one handle are
/// announced to subscribers of the other handles, never to the writer.
#[derive(Clone)]
pub struct MemoryStore {
    backing: Rc<Backing>,
    context: u64,
}

impl MemoryStore {
    /// Empty store for `namespace` without a quota.
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self {
            backing: Rc::new(Backing {
                namespace,
                entries: RefCell::new(BTreeMap::new()),
                quota_bytes: Cell::new(None),
                unavailable: Cell::new(false),
                next_context: Cell::new(1),
                listeners: Listeners::new(),
            }),
            context: 0,
        }
    }

    /// Durable store, the common case.
    #[must_use]
    pub fn durable() -> Self {
        Self::new(Namespace::Durable)
    }

    /// Session store.
    #[must_use]
    pub fn session() -> Self {
        Self::new(Namespace::Session)
    }

    /// Another context on the same origin.
    ///
    /// Durable stores share entries with the new context; session stores are
    /// private to each context, so the fork starts empty.
    #[must_use]
    pub fn fork_context(&self) -> Self {
        if !self.backing.namespace.broadcasts_changes() {
            let fork = Self::new(self.backing.namespace);
            fork.set_quota(self.backing.quota_bytes.get());
            return fork;
        }
        let context = self.backing.next_context.get();
        self.backing.next_context.set(context + 1);
        Self {
            backing: Rc::clone(&self.backing),
            context,
        }
    }

    /// Limit the total size (key plus value bytes) of stored entries.
    pub fn set_quota(&self, quota_bytes: Option<usize>) {
        self.backing.quota_bytes.set(quota_bytes);
    }

    /// Make every operation fail as if the storage area were disabled.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.backing.unavailable.set(unavailable);
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backing.entries.borrow().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.backing.unavailable.get() {
            return Err(StoreError::Unavailable {
                namespace: self.backing.namespace,
            });
        }
        Ok(())
    }

    fn ensure_capacity(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let Some(quota) = self.backing.quota_bytes.get() else {
            return Ok(());
        };
        let used: usize = self
            .backing
            .entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, stored)| existing.len() + stored.len())
            .sum();
        let requested = key.len() + value.len();
        let available = quota.saturating_sub(used);
        if requested > available {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                requested_bytes: requested,
                available_bytes: available,
            });
        }
        Ok(())
    }

    fn announce(&self, key: &str, new_value: Option<String>) {
        if !self.backing.namespace.broadcasts_changes() {
            return;
        }
        self.backing.listeners.notify(&Notification {
            origin: self.context,
            change: StoreChange {
                key: key.to_string(),
                new_value,
            },
        });
    }
}

impl KeyValueStore for MemoryStore {
    fn namespace(&self) -> Namespace {
        self.backing.namespace
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.ensure_available()?;
        Ok(self.backing.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_available()?;
        self.ensure_capacity(key, value)?;
        let previous = self
            .backing
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.announce(key, Some(value.to_string()));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.ensure_available()?;
        let previous = self.backing.entries.borrow_mut().remove(key);
        if previous.is_some() {
            self.announce(key, None);
        }
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> Subscription {
        if !self.backing.namespace.broadcasts_changes() {
            return Subscription::inert();
        }
        let context = self.context;
        self.backing.listeners.add(move |notification: &Notification| {
            if notification.origin != context {
                listener(&notification.change);
            }
        })
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MemoryStore")
            .field("namespace", &self.backing.namespace)
            .field("context", &self.context)
            .field("entries", &self.backing.entries.borrow().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(store: &MemoryStore) -> (Rc<RefCell<Vec<StoreChange>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = Rc::clone(&seen);
            store.subscribe(Box::new(move |change| seen.borrow_mut().push(change.clone())))
        };
        (seen, sub)
    }

    #[test]
    fn durable_changes_reach_other_contexts_only() -> anyhow::Result<()> {
        let first = MemoryStore::durable();
        let second = first.fork_context();
        let (first_seen, _first_sub) = recorder(&first);
        let (second_seen, _second_sub) = recorder(&second);

        first.set("neodash.theme", "\"dark\"")?;

        assert!(first_seen.borrow().is_empty());
        assert_eq!(
            *second_seen.borrow(),
            vec![StoreChange {
                key: "neodash.theme".to_string(),
                new_value: Some("\"dark\"".to_string()),
            }]
        );
        assert_eq!(second.get("neodash.theme")?.as_deref(), Some("\"dark\""));
        Ok(())
    }

    #[test]
    fn unchanged_writes_are_not_announced() -> anyhow::Result<()> {
        let first = MemoryStore::durable();
        let second = first.fork_context();
        let (seen, _sub) = recorder(&second);

        first.set("k", "1")?;
        first.set("k", "1")?;
        first.remove("k")?;
        first.remove("k")?;

        let values: Vec<Option<String>> =
            seen.borrow().iter().map(|c| c.new_value.clone()).collect();
        assert_eq!(values, vec![Some("1".to_string()), None]);
        Ok(())
    }

    #[test]
    fn session_contexts_are_isolated() -> anyhow::Result<()> {
        let first = MemoryStore::session();
        let second = first.fork_context();
        let sub = second.subscribe(Box::new(|_| {}));
        assert!(!sub.is_active());

        first.set("draft", "\"hello\"")?;
        assert_eq!(second.get("draft")?, None);
        Ok(())
    }

    #[test]
    fn quota_rejects_oversized_writes_and_keeps_previous_entry() -> anyhow::Result<()> {
        let store = MemoryStore::durable();
        store.set_quota(Some(8));
        store.set("k", "1234")?;

        let err = store.set("k", "123456789");
        assert!(matches!(
            err,
            Err(StoreError::QuotaExceeded {
                requested_bytes: 10,
                available_bytes: 8,
                ..
            })
        ));
        assert_eq!(store.get("k")?.as_deref(), Some("1234"));
        Ok(())
    }

    #[test]
    fn unavailable_store_fails_every_operation() {
        let store = MemoryStore::durable();
        store.set_unavailable(true);
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable { .. })));
        assert!(store.set("k", "1").is_err());
        assert!(store.remove("k").is_err());
        assert!(store.is_empty());
    }
}
