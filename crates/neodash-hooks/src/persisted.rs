//! Typed value bound to a key-value store entry.
//!
//! # Design
//! - The in-memory value is authoritative for the UI: writes update it first
//!   and persist best-effort, so a failing store never blocks the interface.
//! - Read, write and decode failures are logged, never returned. Only the
//!   async action wrapper surfaces errors to callers.
//! - Durable bindings follow writes from other contexts through the store's
//!   change notifications; two bindings in the same context do not see each
//!   other's writes until they re-read the store.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::store::{KeyValueStore, Namespace, StoreChange};
use crate::subscription::{Listeners, Subscription};

/// Value of type `T` persisted under `key` in store `S`.
pub struct PersistedValue<T, S: KeyValueStore> {
    key: String,
    store: S,
    initial: T,
    value: Rc<RefCell<T>>,
    observers: Listeners<T>,
    subscription: Option<Subscription>,
}

impl<T, S> PersistedValue<T, S>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
    S: KeyValueStore,
{
    /// Bind `key`, starting from the stored entry when it decodes, else `initial`.
    ///
    /// The fallback is not written back; the store only changes on [`PersistedValue::set`].
    pub fn open(store: S, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = Rc::new(RefCell::new(read_entry(&store, &key).unwrap_or_else(|| initial.clone())));
        let observers = Listeners::new();
        let subscription = store.namespace().broadcasts_changes().then(|| {
            let key = key.clone();
            let value = Rc::downgrade(&value);
            let observers = observers.clone();
            store.subscribe(Box::new(move |change| {
                apply_remote(&key, change, &value, &observers);
            }))
        });

        Self {
            key,
            store,
            initial,
            value,
            observers,
            subscription,
        }
    }

    /// Key the value is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Namespace of the backing store.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.store.namespace()
    }

    /// Backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&*self.value.borrow())
    }

    /// Replace the value and persist it.
    pub fn set(&self, next: T) {
        self.update(|_| next);
    }

    /// Compute the next value from the current one and persist it.
    pub fn update(&self, next: impl FnOnce(&T) -> T) {
        let next = {
            let current = self.value.borrow();
            next(&*current)
        };
        self.value.replace(next.clone());
        self.persist(&next);
        self.observers.notify(&next);
    }

    /// Delete the stored entry and fall back to the initial value.
    pub fn remove(&self) {
        if let Err(err) = self.store.remove(&self.key) {
            log_write_failure(&self.key, self.store.namespace(), &err);
        }
        let initial = self.initial.clone();
        self.value.replace(initial.clone());
        self.observers.notify(&initial);
    }

    /// Run `observer` after every local or remote change.
    pub fn observe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.observers.add(observer)
    }

    /// Whether remote changes are still being applied.
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop applying remote changes. Local reads and writes keep working.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    fn persist(&self, value: &T) {
        let namespace = self.store.namespace();
        let result = encode(&self.key, value).and_then(|raw| self.store.set(&self.key, &raw));
        if let Err(err) = result {
            log_write_failure(&self.key, namespace, &err);
        }
    }
}

/// Encode `value`, refusing text that would not decode back to it.
fn encode<T: Serialize + DeserializeOwned>(key: &str, value: &T) -> Result<String, StoreError> {
    let serialize_err = |source| StoreError::Serialize {
        key: key.to_string(),
        source,
    };
    let raw = serde_json::to_string(value).map_err(serialize_err)?;
    let lossy = || StoreError::Lossy { key: key.to_string() };
    let decoded: T = serde_json::from_str(&raw).map_err(|_| lossy())?;
    if serde_json::to_value(&decoded).map_err(serialize_err)? != serde_json::to_value(value).map_err(serialize_err)? {
        return Err(lossy());
    }
    Ok(raw)
}

fn read_entry<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(err) => {
            tracing::warn!(key, namespace = %store.namespace(), error = %err, "failed to read stored value");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(source) => {
            let err = StoreError::Deserialize {
                key: key.to_string(),
                source,
            };
            tracing::warn!(key, namespace = %store.namespace(), error = ?err, "ignoring undecodable stored value");
            None
        }
    }
}

fn apply_remote<T>(key: &str, change: &StoreChange, value: &Weak<RefCell<T>>, observers: &Listeners<T>)
where
    T: DeserializeOwned + Clone + 'static,
{
    if change.key != key {
        return;
    }
    let Some(raw) = change.new_value.as_deref().filter(|raw| !raw.is_empty()) else {
        tracing::debug!(key, "ignoring remote removal");
        return;
    };
    let next: T = match serde_json::from_str(raw) {
        Ok(next) => next,
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring undecodable remote value");
            return;
        }
    };
    let Some(cell) = value.upgrade() else {
        return;
    };
    cell.replace(next.clone());
    tracing::debug!(key, "applied remote value");
    observers.notify(&next);
}

fn log_write_failure(key: &str, namespace: Namespace, err: &StoreError) {
    tracing::error!(key, namespace = %namespace, error = %err, "failed to persist value");
}

impl<T: fmt::Debug, S: KeyValueStore> fmt::Debug for PersistedValue<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PersistedValue")
            .field("key", &self.key)
            .field("namespace", &self.store.namespace())
            .field("value", &*self.value.borrow())
            .field("listening", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde::Deserialize;
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Layout {
        collapsed: bool,
        pinned: Vec<String>,
    }

    #[test]
    fn stored_entry_wins_over_default() -> anyhow::Result<()> {
        let store = MemoryStore::durable();
        store.set("neodash.theme", "\"dark\"")?;

        let theme = PersistedValue::open(store.clone(), "neodash.theme", "light".to_string());
        assert_eq!(theme.get(), "dark");

        theme.set("light".to_string());
        assert_eq!(theme.get(), "light");
        assert_eq!(store.get("neodash.theme")?.as_deref(), Some("\"light\""));
        Ok(())
    }

    #[test]
    fn missing_or_invalid_entries_fall_back_without_writing() -> anyhow::Result<()> {
        let store = MemoryStore::durable();
        let fresh = PersistedValue::open(store.clone(), "count", 7_u32);
        assert_eq!(fresh.get(), 7);
        assert_eq!(store.get("count")?, None);

        store.set("count", "not json")?;
        let broken = PersistedValue::open(store.clone(), "count", 7_u32);
        assert_eq!(broken.get(), 7);
        assert_eq!(store.get("count")?.as_deref(), Some("not json"));

        store.set("count", "")?;
        assert_eq!(PersistedValue::open(store, "count", 3_u32).get(), 3);
        Ok(())
    }

    #[test]
    fn unreadable_store_falls_back_to_default() {
        let store = MemoryStore::durable();
        store.set_unavailable(true);
        let value = PersistedValue::open(store, "k", true);
        assert!(value.get());
    }

    #[test]
    fn updater_sees_previous_value() -> anyhow::Result<()> {
        let store = MemoryStore::session();
        let counter = PersistedValue::open(store.clone(), "visits", 0_u32);
        counter.update(|current| current + 1);
        counter.update(|current| current + 1);
        assert_eq!(counter.get(), 2);
        assert_eq!(store.get("visits")?.as_deref(), Some("2"));
        Ok(())
    }

    #[test]
    fn failed_write_keeps_memory_update_and_store_contents() -> anyhow::Result<()> {
        let store = MemoryStore::durable();
        store.set("note", "\"old\"")?;
        store.set_quota(Some(12));

        let note = PersistedValue::open(store.clone(), "note", String::new());
        note.set("a value that is far too long".to_string());

        assert_eq!(note.get(), "a value that is far too long");
        assert_eq!(store.get("note")?.as_deref(), Some("\"old\""));
        Ok(())
    }

    #[test]
    fn remote_changes_update_durable_bindings() -> anyhow::Result<()> {
        let tab_a = MemoryStore::durable();
        let tab_b = tab_a.fork_context();
        let layout_b = PersistedValue::open(
            tab_b,
            "layout",
            Layout {
                collapsed: false,
                pinned: Vec::new(),
            },
        );
        let seen = Rc::new(Cell::new(0));
        let _observer = {
            let seen = Rc::clone(&seen);
            layout_b.observe(move |_| seen.set(seen.get() + 1))
        };

        let layout_a = PersistedValue::open(tab_a.clone(), "layout", layout_b.get());
        layout_a.set(Layout {
            collapsed: true,
            pinned: vec!["/leads".to_string()],
        });

        assert_eq!(layout_b.get(), layout_a.get());
        assert_eq!(seen.get(), 1);

        tab_a.set("layout", "{broken")?;
        tab_a.set("other", "1")?;
        tab_a.remove("layout")?;
        assert_eq!(layout_b.get(), layout_a.get());
        assert_eq!(seen.get(), 1);
        Ok(())
    }

    #[test]
    fn same_context_bindings_diverge_until_reopened() {
        let store = MemoryStore::durable();
        let first = PersistedValue::open(store.clone(), "flag", false);
        let second = PersistedValue::open(store.clone(), "flag", false);

        first.set(true);
        assert!(!second.get());
        assert!(PersistedValue::open(store, "flag", false).get());
    }

    #[test]
    fn closing_stops_remote_updates() {
        let tab_a = MemoryStore::durable();
        let tab_b = tab_a.fork_context();
        let mut watched = PersistedValue::open(tab_b, "n", 0_i64);
        assert!(watched.is_listening());

        watched.close();
        PersistedValue::open(tab_a, "n", 0_i64).set(5);
        assert_eq!(watched.get(), 0);
        assert!(!watched.is_listening());
    }

    #[test]
    fn session_bindings_do_not_listen() {
        let value = PersistedValue::open(MemoryStore::session(), "draft", String::new());
        assert!(!value.is_listening());
        assert_eq!(value.namespace(), Namespace::Session);
    }

    #[test]
    fn non_finite_floats_are_not_written() -> anyhow::Result<()> {
        let store = MemoryStore::durable();
        let ratio = PersistedValue::open(store.clone(), "ratio", 1.5_f64);
        ratio.set(0.25);
        ratio.set(f64::NAN);
        assert!(ratio.get().is_nan());
        assert_eq!(store.get("ratio")?.as_deref(), Some("0.25"));

        ratio.set(f64::INFINITY);
        assert_eq!(store.get("ratio")?.as_deref(), Some("0.25"));
        assert!((PersistedValue::open(store, "ratio", 1.5_f64).get() - 0.25).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn encode_reports_lossy_values() {
        assert!(matches!(
            encode("ratio", &vec![1.0_f64, f64::NEG_INFINITY]),
            Err(StoreError::Lossy { key }) if key == "ratio"
        ));
        assert_eq!(encode("ratio", &1.0715660391465826e-75_f64).ok().as_deref(), Some("1.0715660391465826e-75"));
    }

    #[test]
    fn remove_resets_to_initial() -> anyhow::Result<()> {
        let store = MemoryStore::durable();
        let value = PersistedValue::open(store.clone(), "size", 10_u8);
        value.set(12);
        value.remove();
        assert_eq!(value.get(), 10);
        assert_eq!(store.get("size")?, None);
        Ok(())
    }
}
