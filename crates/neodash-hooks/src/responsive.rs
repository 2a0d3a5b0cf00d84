//! Breakpoint tracking for responsive layout decisions.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::breakpoints::Breakpoint;
use crate::error::BreakpointError;
use crate::subscription::{Listeners, Subscription};

/// Source of viewport-condition state, e.g. `window.matchMedia`.
pub trait ViewportSource {
    /// Current value of the breakpoint predicate.
    fn matches(&self, breakpoint: Breakpoint) -> bool;

    /// Register for predicate changes. The listener only runs when the value
    /// flips, never for widths that stay on the same side of the boundary.
    fn watch(&self, breakpoint: Breakpoint, listener: Box<dyn Fn(bool)>) -> Subscription;
}

impl<V: ViewportSource + ?Sized> ViewportSource for Rc<V> {
    fn matches(&self, breakpoint: Breakpoint) -> bool {
        (**self).matches(breakpoint)
    }

    fn watch(&self, breakpoint: Breakpoint, listener: Box<dyn Fn(bool)>) -> Subscription {
        (**self).watch(breakpoint, listener)
    }
}

#[derive(Clone, Copy, Debug)]
struct Resize {
    previous: u32,
    current: u32,
}

/// Viewport with a width driven by the caller, for native use and tests.
#[derive(Clone)]
pub struct SimulatedViewport {
    width: Rc<Cell<u32>>,
    resizes: Listeners<Resize>,
}

impl SimulatedViewport {
    /// Viewport starting at `width`.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width: Rc::new(Cell::new(width)),
            resizes: Listeners::new(),
        }
    }

    /// Current width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Resize the viewport, notifying watchers whose predicate flipped.
    pub fn set_width(&self, width: u32) {
        let previous = self.width.replace(width);
        if previous != width {
            self.resizes.notify(&Resize {
                previous,
                current: width,
            });
        }
    }

    /// Number of active watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.resizes.len()
    }
}

impl ViewportSource for SimulatedViewport {
    fn matches(&self, breakpoint: Breakpoint) -> bool {
        breakpoint.matches_width(self.width.get())
    }

    fn watch(&self, breakpoint: Breakpoint, listener: Box<dyn Fn(bool)>) -> Subscription {
        self.resizes.add(move |resize: &Resize| {
            let before = breakpoint.matches_width(resize.previous);
            let after = breakpoint.matches_width(resize.current);
            if before != after {
                listener(after);
            }
        })
    }
}

impl fmt::Debug for SimulatedViewport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SimulatedViewport")
            .field("width", &self.width.get())
            .field("watchers", &self.resizes.len())
            .finish()
    }
}

/// Boolean that follows a breakpoint predicate until closed.
pub struct ResponsiveFlag {
    breakpoint: Breakpoint,
    matches: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl ResponsiveFlag {
    /// Read the current state and start watching for changes.
    pub fn create<V: ViewportSource + ?Sized>(source: &V, breakpoint: Breakpoint) -> Self {
        Self::with_observer(source, breakpoint, |_| {})
    }

    /// Like [`ResponsiveFlag::create`], also calling `observer` with each new value.
    pub fn with_observer<V, F>(source: &V, breakpoint: Breakpoint, observer: F) -> Self
    where
        V: ViewportSource + ?Sized,
        F: Fn(bool) + 'static,
    {
        let matches = Rc::new(Cell::new(source.matches(breakpoint)));
        let subscription = {
            let matches = Rc::clone(&matches);
            source.watch(
                breakpoint,
                Box::new(move |value| {
                    matches.set(value);
                    observer(value);
                }),
            )
        };
        tracing::trace!(breakpoint = %breakpoint, matches = matches.get(), "watching breakpoint");
        Self {
            breakpoint,
            matches,
            subscription: Some(subscription),
        }
    }

    /// Resolve `name` against the fixed breakpoint set and start watching.
    ///
    /// # Errors
    ///
    /// Returns [`BreakpointError::Unknown`] when `name` is not a known breakpoint.
    pub fn create_named<V: ViewportSource + ?Sized>(
        source: &V,
        name: &str,
    ) -> Result<Self, BreakpointError> {
        let breakpoint = name.parse::<Breakpoint>()?;
        Ok(Self::create(source, breakpoint))
    }

    /// Breakpoint being tracked.
    #[must_use]
    pub const fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Latest predicate value.
    #[must_use]
    pub fn matches(&self) -> bool {
        self.matches.get()
    }

    /// Whether the change listener is still registered.
    #[must_use]
    pub const fn is_watching(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop watching; the last value stays readable.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

impl fmt::Debug for ResponsiveFlag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ResponsiveFlag")
            .field("breakpoint", &self.breakpoint)
            .field("matches", &self.matches.get())
            .field("watching", &self.is_watching())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn initial_state_is_read_immediately() {
        let wide = SimulatedViewport::new(1000);
        let narrow = SimulatedViewport::new(700);
        assert!(ResponsiveFlag::create(&wide, Breakpoint::Md).matches());
        assert!(!ResponsiveFlag::create(&narrow, Breakpoint::Md).matches());
    }

    #[test]
    fn crossing_the_boundary_flips_exactly_once() {
        let viewport = SimulatedViewport::new(700);
        let flips = Rc::new(RefCell::new(Vec::new()));
        let flag = {
            let flips = Rc::clone(&flips);
            ResponsiveFlag::with_observer(&viewport, Breakpoint::Md, move |value| {
                flips.borrow_mut().push(value);
            })
        };

        viewport.set_width(1000);
        assert!(flag.matches());
        assert_eq!(*flips.borrow(), vec![true]);

        viewport.set_width(1200);
        viewport.set_width(800);
        assert_eq!(flips.borrow().len(), 1);
    }

    #[test]
    fn xs_tracks_upper_bound() {
        let viewport = SimulatedViewport::new(320);
        let flag = ResponsiveFlag::create(&viewport, Breakpoint::Xs);
        assert!(flag.matches());
        viewport.set_width(640);
        assert!(!flag.matches());
    }

    #[test]
    fn close_and_drop_deregister_the_listener() {
        let viewport = SimulatedViewport::new(700);
        let mut flag = ResponsiveFlag::create(&viewport, Breakpoint::Lg);
        let other = ResponsiveFlag::create(&viewport, Breakpoint::Sm);
        assert_eq!(viewport.watcher_count(), 2);

        flag.close();
        assert!(!flag.is_watching());
        viewport.set_width(1100);
        assert!(!flag.matches());

        drop(other);
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn unknown_names_are_rejected_at_construction() {
        let viewport = SimulatedViewport::new(1024);
        let err = ResponsiveFlag::create_named(&viewport, "huge");
        assert!(matches!(err, Err(BreakpointError::Unknown { name }) if name == "huge"));

        let flag = ResponsiveFlag::create_named(&viewport, "2xl");
        assert!(flag.is_ok_and(|flag| !flag.matches()));
    }
}
