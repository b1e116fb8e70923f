//! Error types for curio-market.

use curio_core::{Amount, BindingId, CollectionId, ListingId, Payment};
use curio_policy::PolicyError;
use thiserror::Error;

/// Result type alias for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors that can occur in marketplace operations.
///
/// Every variant is a hard abort of the enclosing operation; nothing is
/// retried internally and no partial effect survives a failure.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Payment below the listing price.
    #[error("insufficient payment: paid {paid}, price {price}")]
    InsufficientPayment {
        /// Value of the presented payment.
        paid: Amount,
        /// The listing price.
        price: Amount,
    },

    /// Cancel attempted by an identity other than the recorded seller.
    #[error("not the seller of listing {listing}")]
    NotSeller {
        /// The listing whose seller check failed.
        listing: ListingId,
    },

    /// Binding mutation attempted by an identity other than its owner.
    #[error("not the owner of binding {binding}")]
    NotOwner {
        /// The binding whose owner check failed.
        binding: BindingId,
    },

    /// An authorization predicate failed.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Which check rejected the caller.
        reason: String,
    },

    /// The binding's collection disagrees with the target collection.
    #[error("binding mismatch: binding is for {bound}, expected {expected}")]
    BindMismatch {
        /// Collection the binding points at.
        bound: CollectionId,
        /// Collection the operation targets.
        expected: CollectionId,
    },

    /// Listing id unknown or already consumed.
    #[error("listing not found: {listing}")]
    ListingNotFound {
        /// The presented listing id.
        listing: ListingId,
    },

    /// The external custodial-escrow service rejected a call.
    #[error("custody error: {message}")]
    Custody {
        /// Description from the custodial service.
        message: String,
    },
}

impl MarketError {
    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Create a custody error.
    #[must_use]
    pub fn custody(message: impl Into<String>) -> Self {
        Self::Custody {
            message: message.into(),
        }
    }
}

/// A rejected purchase: the error plus the buyer's payment.
///
/// `Payment` is a linear resource, so a purchase that consumes it by value
/// must hand it back when the operation aborts — a failed buy leaves no
/// trace of partial effect, and that includes the buyer's funds.
#[derive(Debug, Error)]
#[error("purchase rejected: {error}")]
pub struct BuyRejected {
    /// Why the purchase was rejected.
    pub error: MarketError,

    /// The buyer's payment, returned untouched.
    pub refund: Payment,
}

impl BuyRejected {
    /// Pair an error with the payment being handed back.
    #[must_use]
    pub const fn new(error: MarketError, refund: Payment) -> Self {
        Self { error, refund }
    }
}

impl From<PolicyError> for MarketError {
    fn from(e: PolicyError) -> Self {
        Self::Forbidden {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_payment_display() {
        let err = MarketError::InsufficientPayment {
            paid: Amount::from_units(50),
            price: Amount::from_units(100),
        };
        assert!(err.to_string().contains("50"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn bind_mismatch_display() {
        let bound = CollectionId::from_string("col-a");
        let expected = CollectionId::from_string("col-b");
        let err = MarketError::BindMismatch { bound, expected };
        assert!(err.to_string().contains("col-a"));
        assert!(err.to_string().contains("col-b"));
    }

    #[test]
    fn policy_error_bridges_to_forbidden() {
        let err: MarketError = PolicyError::forbidden("market not whitelisted").into();
        assert!(err.to_string().contains("market not whitelisted"));
    }
}
