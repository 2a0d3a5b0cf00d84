//! Browser bindings for the DOM-free hook seams.

pub mod storage;
pub mod viewport;

pub use storage::WebStorage;
pub use viewport::MediaViewport;
