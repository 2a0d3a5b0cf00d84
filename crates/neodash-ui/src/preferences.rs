//! Keys of the values the shell persists.

use neodash_hooks::StorageConfig;

/// Light/dark preference, durable.
pub const THEME_KEY: &str = "neodash.theme";
/// Whether notification emails are enabled, durable.
pub const NOTIFICATIONS_KEY: &str = "neodash.settings.notifications";
/// Display name shown in the header, durable.
pub const DISPLAY_NAME_KEY: &str = "neodash.settings.display_name";
/// Unsent message draft, kept for the current tab only.
pub const MESSAGE_DRAFT_KEY: &str = "neodash.messages.draft";

/// Every key above, for diagnostics and reset.
pub const ALL_KEYS: [&str; 4] = [THEME_KEY, NOTIFICATIONS_KEY, DISPLAY_NAME_KEY, MESSAGE_DRAFT_KEY];

/// Storage layout used by the shell.
#[must_use]
pub fn storage_config() -> StorageConfig {
    StorageConfig::default()
}
