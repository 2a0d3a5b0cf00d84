//! Yew bindings for the state helpers in `neodash-hooks`.
//!
//! Each hook owns its helper for the lifetime of the component and drops it
//! on unmount, which releases the underlying browser listener.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use neodash_hooks::{AsyncOperation, Breakpoint, Namespace, PersistedValue, ResponsiveFlag, ViewportSource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use yew::prelude::*;

use crate::services::{MediaViewport, WebStorage};

/// Run `task` on the browser microtask queue.
pub fn spawn_browser(task: LocalBoxFuture<'static, ()>) {
    wasm_bindgen_futures::spawn_local(task);
}

/// Async action with a re-rendering lifecycle.
///
/// With `immediate`, one execution with `initial_args` starts after the first
/// render. The returned handle shares state across renders; calling
/// [`AsyncOperation::execute_with`] from a callback re-renders on every
/// transition.
#[hook]
pub fn use_async<A, T, E, F, Fut>(action: F, immediate: bool, initial_args: A) -> AsyncOperation<A, T, E>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Clone + fmt::Debug + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let operation = use_memo(move |_| AsyncOperation::new(action, initial_args), ());
    let update = use_force_update();
    {
        let operation = Rc::clone(&operation);
        use_effect_with_deps(
            move |_| {
                let subscription = operation.observe(move |_| update.force_update());
                if immediate {
                    operation.spawn(&spawn_browser);
                }
                move || drop(subscription)
            },
            (),
        );
    }
    (*operation).clone()
}

/// Persisted value bound to `key` in `localStorage`.
#[hook]
pub fn use_persisted_state<T>(key: &'static str, initial: T) -> Rc<PersistedValue<T, WebStorage>>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    use_persisted_state_in(Namespace::Durable, key, initial)
}

/// Persisted value bound to `key` in the chosen namespace.
///
/// Durable values follow writes made in other tabs; every change re-renders.
#[hook]
pub fn use_persisted_state_in<T>(
    namespace: Namespace,
    key: &'static str,
    initial: T,
) -> Rc<PersistedValue<T, WebStorage>>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let value = use_memo(
        move |(namespace, key)| PersistedValue::open(WebStorage::new(*namespace), *key, initial),
        (namespace, key),
    );
    let update = use_force_update();
    {
        let value = Rc::clone(&value);
        use_effect_with_deps(
            move |_| {
                let subscription = value.observe(move |_| update.force_update());
                move || drop(subscription)
            },
            (namespace, key),
        );
    }
    value
}

/// Whether `breakpoint` currently matches the viewport.
#[hook]
pub fn use_media_query(breakpoint: Breakpoint) -> bool {
    let matches = use_state(|| MediaViewport.matches(breakpoint));
    {
        let matches = matches.clone();
        use_effect_with_deps(
            move |breakpoint| {
                let setter = matches.setter();
                let flag = ResponsiveFlag::with_observer(&MediaViewport, *breakpoint, move |value| {
                    setter.set(value);
                });
                matches.set(flag.matches());
                move || drop(flag)
            },
            breakpoint,
        );
    }
    *matches
}

/// `false` on the first render and `true` afterwards, for CSS enter transitions.
#[hook]
pub fn use_entered() -> bool {
    let entered = use_state(|| false);
    {
        let entered = entered.clone();
        use_effect_with_deps(
            move |_| {
                entered.set(true);
                || ()
            },
            (),
        );
    }
    *entered
}
