//! Error types for curio-core.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid identity address format.
    #[error("invalid identity: {message}")]
    InvalidIdentity {
        /// Description of the address error.
        message: String,
    },

    /// Amount arithmetic overflowed.
    #[error("amount overflow: {message}")]
    AmountOverflow {
        /// Description of the overflowing operation.
        message: String,
    },
}

impl CoreError {
    /// Create an invalid identity error.
    #[must_use]
    pub fn invalid_identity(message: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            message: message.into(),
        }
    }

    /// Create an amount overflow error.
    #[must_use]
    pub fn amount_overflow(message: impl Into<String>) -> Self {
        Self::AmountOverflow {
            message: message.into(),
        }
    }
}
