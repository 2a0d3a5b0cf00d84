//! Error types for the store and breakpoint plumbing.
//!
//! Action failures inside [`crate::AsyncOperation`] use the caller's own error
//! type and never pass through here.

use thiserror::Error;

use crate::store::Namespace;

/// Failure reported by a [`crate::KeyValueStore`] or by value (de)serialization.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage area cannot be reached (disabled, private mode, no window).
    #[error("storage namespace unavailable")]
    Unavailable {
        /// Namespace that could not be reached.
        namespace: Namespace,
    },
    /// The write would exceed the storage quota.
    #[error("storage quota exceeded")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Size of the rejected entry in bytes.
        requested_bytes: usize,
        /// Remaining capacity in bytes.
        available_bytes: usize,
    },
    /// The backend rejected the operation for another reason.
    #[error("storage operation rejected")]
    Rejected {
        /// Key involved in the operation.
        key: String,
        /// Backend-provided detail.
        detail: String,
    },
    /// The value could not be encoded.
    #[error("failed to serialize stored value")]
    Serialize {
        /// Key the value was bound to.
        key: String,
        /// Encoder error.
        source: serde_json::Error,
    },
    /// The encoded text does not decode back to the value that was written,
    /// e.g. a non-finite float encoded as `null`.
    #[error("stored value does not survive encoding")]
    Lossy {
        /// Key the value was bound to.
        key: String,
    },
    /// The stored text could not be decoded into the expected type.
    #[error("failed to deserialize stored value")]
    Deserialize {
        /// Key the value was read from.
        key: String,
        /// Decoder error.
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Key associated with the failure, when there is one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Unavailable { .. } => None,
            Self::QuotaExceeded { key, .. }
            | Self::Rejected { key, .. }
            | Self::Serialize { key, .. }
            | Self::Lossy { key, .. }
            | Self::Deserialize { key, .. } => Some(key),
        }
    }
}

/// Breakpoint names outside the fixed set are a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointError {
    /// The supplied name is not one of `xs`, `sm`, `md`, `lg`, `xl`, `2xl`.
    #[error("unknown breakpoint")]
    Unknown {
        /// Name provided by the caller.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_exposes_key() {
        let err = StoreError::QuotaExceeded {
            key: "neodash.theme".to_string(),
            requested_bytes: 12,
            available_bytes: 4,
        };
        assert_eq!(err.key(), Some("neodash.theme"));
        assert_eq!(err.to_string(), "storage quota exceeded");

        let err = StoreError::Unavailable {
            namespace: Namespace::Session,
        };
        assert_eq!(err.key(), None);
    }

    #[test]
    fn breakpoint_error_message_is_stable() {
        let err = BreakpointError::Unknown {
            name: "huge".to_string(),
        };
        assert_eq!(err.to_string(), "unknown breakpoint");
    }
}
