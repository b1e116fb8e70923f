//! Error types for curio-policy.

use curio_collection::CollectionError;
use thiserror::Error;

/// Result type alias for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Errors that can occur in transfer-policy operations.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// An authorization predicate failed.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Which check rejected the caller.
        reason: String,
    },
}

impl PolicyError {
    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

impl From<CollectionError> for PolicyError {
    fn from(e: CollectionError) -> Self {
        Self::Forbidden {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_display() {
        let err = PolicyError::forbidden("caller is not the policy creator");
        assert!(err.to_string().contains("policy creator"));
    }

    #[test]
    fn collection_error_bridges_to_forbidden() {
        let err: PolicyError = CollectionError::forbidden("capability mismatch").into();
        assert!(err.to_string().contains("capability mismatch"));
    }
}
