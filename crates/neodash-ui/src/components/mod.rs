//! Visual primitives and the dashboard chrome.

pub(crate) mod button;
pub(crate) mod card;
pub(crate) mod header;
pub(crate) mod input;
pub(crate) mod layout;
pub(crate) mod sidebar;
pub(crate) mod toggle;
