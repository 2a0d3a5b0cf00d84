#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! DOM-free state helpers for the NeoDash web UI.
//!
//! The crate holds the three pieces of reusable UI state plumbing plus the
//! small presentation utilities shared by the front-end:
//!
//! - [`AsyncOperation`]: lifecycle wrapper around one asynchronous action.
//! - [`PersistedValue`]: a typed value bound to a [`KeyValueStore`] entry.
//! - [`ResponsiveFlag`]: tracks whether a [`Breakpoint`] currently matches.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and driven by events,
//! so the same code runs inside the browser and in native tests.

pub mod async_op;
pub mod breakpoints;
pub mod config;
pub mod error;
pub mod format;
pub mod motion;
pub mod persisted;
pub mod responsive;
pub mod store;
pub mod subscription;

pub use async_op::{AsyncOperation, AsyncState, AsyncStatus, CompletionPolicy, LocalSpawner};
pub use breakpoints::Breakpoint;
pub use config::StorageConfig;
pub use error::{BreakpointError, StoreError};
pub use persisted::PersistedValue;
pub use responsive::{ResponsiveFlag, SimulatedViewport, ViewportSource};
pub use store::{KeyValueStore, MemoryStore, Namespace, StoreChange};
pub use subscription::Subscription;
