#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! NeoDash web UI.
//!
//! Theme, navigation, class tokens and dashboard figures are plain Rust and
//! compile on every target. Browser bindings, Yew hooks, components and the
//! app shell only exist on `wasm32`.

pub mod foundations;
pub mod metrics;
pub mod nav;
pub mod preferences;
pub mod routes;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod hooks;
#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
