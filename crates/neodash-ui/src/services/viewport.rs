//! `window.matchMedia` behind [`ViewportSource`].

use gloo::console;
use gloo::events::EventListener;
use gloo::utils::window;
use neodash_hooks::{Breakpoint, Subscription, ViewportSource};
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

/// The browser viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaViewport;

impl MediaViewport {
    fn query(breakpoint: Breakpoint) -> Option<MediaQueryList> {
        window()
            .match_media(&breakpoint.media_query())
            .ok()
            .flatten()
    }
}

impl ViewportSource for MediaViewport {
    fn matches(&self, breakpoint: Breakpoint) -> bool {
        Self::query(breakpoint).is_some_and(|list| list.matches())
    }

    fn watch(&self, breakpoint: Breakpoint, listener: Box<dyn Fn(bool)>) -> Subscription {
        let Some(list) = Self::query(breakpoint) else {
            console::warn!(format!(
                "matchMedia unavailable for breakpoint {breakpoint}; layout will not react to resizes"
            ));
            return Subscription::inert();
        };
        let events = EventListener::new(&list, "change", move |event| {
            if let Some(change) = event.dyn_ref::<MediaQueryListEvent>() {
                listener(change.matches());
            }
        });
        Subscription::new(move || drop(events))
    }
}
