//! Payment amount representation.
//!
//! Amounts are stored in base units (the smallest indivisible unit of the
//! payment currency). All arithmetic is integer-exact; there is no decimal
//! or floating-point representation anywhere in the system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An amount of payment currency, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    units: u64,
}

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self { units: 0 };

    /// Maximum amount (`u64::MAX` base units).
    pub const MAX: Self = Self { units: u64::MAX };

    /// Create an amount from base units.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self { units }
    }

    /// Get the amount in base units.
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.units
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self {
            units: self.units.saturating_add(other.units),
        }
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Self {
            units: self.units.saturating_sub(other.units),
        }
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.units.checked_add(other.units) {
            Some(units) => Some(Self { units }),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: Self) -> Option<Self> {
        match self.units.checked_sub(other.units) {
            Some(units) => Some(Self { units }),
            None => None,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.units)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            units: self.units + other.units,
        }
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            units: self.units - other.units,
        }
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self::from_units(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::ZERO.units(), 0);
    }

    #[test]
    fn add() {
        let a = Amount::from_units(100);
        let b = Amount::from_units(50);
        assert_eq!((a + b).units(), 150);
    }

    #[test]
    fn sub() {
        let a = Amount::from_units(100);
        let b = Amount::from_units(30);
        assert_eq!((a - b).units(), 70);
    }

    #[test]
    fn saturating_add_caps_at_max() {
        let c = Amount::MAX.saturating_add(Amount::from_units(1));
        assert_eq!(c, Amount::MAX);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let c = Amount::from_units(1).saturating_sub(Amount::from_units(2));
        assert!(c.is_zero());
    }

    #[test]
    fn checked_sub_underflow_is_none() {
        let a = Amount::from_units(1);
        let b = Amount::from_units(2);
        assert!(a.checked_sub(b).is_none());
    }

    #[test]
    fn checked_add_overflow_is_none() {
        assert!(Amount::MAX.checked_add(Amount::from_units(1)).is_none());
    }

    #[test]
    fn ordering() {
        assert!(Amount::from_units(1) < Amount::from_units(2));
    }

    #[test]
    fn serde_roundtrip() {
        let amount = Amount::from_units(12345);
        let json = serde_json::to_string(&amount).expect("serialize");
        let parsed: Amount = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(amount, parsed);
    }
}
