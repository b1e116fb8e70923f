//! Linear payment resources.
//!
//! A [`Payment`] represents funds in flight. It is deliberately not `Clone`
//! or `Copy`: funds are moved, split, or merged by consuming the value, so
//! the type system rules out double-spending a payment inside an operation.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Funds in flight, denominated in base units.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    amount: Amount,
}

impl Payment {
    /// Create a payment holding the given amount.
    #[must_use]
    pub const fn new(amount: Amount) -> Self {
        Self { amount }
    }

    /// An empty payment.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            amount: Amount::ZERO,
        }
    }

    /// The value of this payment.
    #[must_use]
    pub const fn value(&self) -> Amount {
        self.amount
    }

    /// Check if the payment holds nothing.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Split this payment into `(exact, change)` where `exact` holds
    /// precisely `at` and `change` holds the remainder.
    ///
    /// Consumes the payment. If it holds less than `at`, the payment comes
    /// back untouched in `Err` — a refused split never destroys funds.
    ///
    /// # Errors
    ///
    /// Returns the original payment if its value is below `at`.
    pub fn split(self, at: Amount) -> std::result::Result<(Self, Self), Self> {
        match self.amount.checked_sub(at) {
            Some(change) => Ok((Self::new(at), Self::new(change))),
            None => Err(self),
        }
    }

    /// Merge another payment into this one, consuming both.
    ///
    /// # Errors
    ///
    /// Returns both payments unchanged on overflow.
    pub fn merge(self, other: Self) -> std::result::Result<Self, (Self, Self)> {
        match self.amount.checked_add(other.amount) {
            Some(amount) => Ok(Self::new(amount)),
            None => Err((self, other)),
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payment({})", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn split_exact() {
        let payment = Payment::new(Amount::from_units(100));
        let (exact, change) = payment.split(Amount::from_units(100)).expect("sufficient");
        assert_eq!(exact.value(), Amount::from_units(100));
        assert!(change.is_zero());
    }

    #[test]
    fn split_with_change() {
        let payment = Payment::new(Amount::from_units(150));
        let (exact, change) = payment.split(Amount::from_units(100)).expect("sufficient");
        assert_eq!(exact.value(), Amount::from_units(100));
        assert_eq!(change.value(), Amount::from_units(50));
    }

    #[test]
    fn split_insufficient_returns_payment() {
        let payment = Payment::new(Amount::from_units(99));
        let refused = payment
            .split(Amount::from_units(100))
            .expect_err("insufficient");
        assert_eq!(refused.value(), Amount::from_units(99));
    }

    #[test]
    fn merge_sums() {
        let merged = Payment::new(Amount::from_units(30))
            .merge(Payment::new(Amount::from_units(12)))
            .expect("no overflow");
        assert_eq!(merged.value(), Amount::from_units(42));
    }

    #[test]
    fn merge_overflow_returns_both() {
        let (a, b) = Payment::new(Amount::MAX)
            .merge(Payment::new(Amount::from_units(1)))
            .expect_err("overflow");
        assert_eq!(a.value(), Amount::MAX);
        assert_eq!(b.value(), Amount::from_units(1));
    }

    proptest! {
        // Splitting never creates or destroys value.
        #[test]
        fn split_conserves_value(paid in 0u64.., price in 0u64..) {
            let payment = Payment::new(Amount::from_units(paid));
            match payment.split(Amount::from_units(price)) {
                Ok((exact, change)) => {
                    prop_assert!(paid >= price);
                    prop_assert_eq!(exact.value().units(), price);
                    prop_assert_eq!(exact.value().units() + change.value().units(), paid);
                }
                Err(refused) => {
                    prop_assert!(paid < price);
                    prop_assert_eq!(refused.value().units(), paid);
                }
            }
        }
    }
}
