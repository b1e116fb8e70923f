//! Error types for curio-collection.

use thiserror::Error;

/// Result type alias for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Errors that can occur in collection and asset operations.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// An authorization predicate failed.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Which check rejected the caller.
        reason: String,
    },

    /// Malformed mint-mode encoding at the decode boundary.
    #[error("invalid mint mode code: {code}")]
    InvalidMode {
        /// The unrecognized mode code.
        code: u8,
    },

    /// Mint attempted at the supply cap.
    #[error("supply exceeded: collection is capped at {max_supply}")]
    SupplyExceeded {
        /// The collection's maximum supply.
        max_supply: u64,
    },
}

impl CollectionError {
    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}
