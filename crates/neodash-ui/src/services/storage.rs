//! `localStorage` / `sessionStorage` behind [`KeyValueStore`].

use gloo::events::EventListener;
use gloo::utils::window;
use neodash_hooks::store::ChangeListener;
use neodash_hooks::{KeyValueStore, Namespace, StoreChange, StoreError, Subscription};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage, StorageEvent};

/// Web Storage area for one namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WebStorage {
    namespace: Namespace,
}

impl WebStorage {
    /// Area backing `namespace`.
    #[must_use]
    pub const fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    /// `localStorage`.
    #[must_use]
    pub const fn local() -> Self {
        Self::new(Namespace::Durable)
    }

    /// `sessionStorage`.
    #[must_use]
    pub const fn session() -> Self {
        Self::new(Namespace::Session)
    }

    fn area(self) -> Result<Storage, StoreError> {
        let area = match self.namespace {
            Namespace::Durable => window().local_storage(),
            Namespace::Session => window().session_storage(),
        };
        area.ok().flatten().ok_or(StoreError::Unavailable {
            namespace: self.namespace,
        })
    }
}

fn rejection(key: &str, value: Option<&str>, err: &JsValue) -> StoreError {
    if let Some(exception) = err.dyn_ref::<DomException>() {
        if exception.name() == "QuotaExceededError" {
            return StoreError::QuotaExceeded {
                key: key.to_string(),
                requested_bytes: key.len() + value.map_or(0, str::len),
                available_bytes: 0,
            };
        }
        return StoreError::Rejected {
            key: key.to_string(),
            detail: exception.message(),
        };
    }
    StoreError::Rejected {
        key: key.to_string(),
        detail: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl KeyValueStore for WebStorage {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.area()?
            .get_item(key)
            .map_err(|err| rejection(key, None, &err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.area()?
            .set_item(key, value)
            .map_err(|err| rejection(key, Some(value), &err))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.area()?
            .remove_item(key)
            .map_err(|err| rejection(key, None, &err))
    }

    fn subscribe(&self, listener: ChangeListener) -> Subscription {
        if !self.namespace.broadcasts_changes() {
            return Subscription::inert();
        }
        // The browser only fires `storage` in other documents, never in the writer.
        let events = EventListener::new(&window(), "storage", move |event| {
            let Some(event) = event.dyn_ref::<StorageEvent>() else {
                return;
            };
            // `clear()` reports no key.
            let Some(key) = event.key() else {
                return;
            };
            listener(&StoreChange {
                key,
                new_value: event.new_value(),
            });
        });
        Subscription::new(move || drop(events))
    }
}
