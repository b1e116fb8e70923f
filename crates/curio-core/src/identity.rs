//! Identities for the Curio marketplace.
//!
//! An identity is an opaque base58-encoded 32-byte address. Every
//! authorization predicate in the system compares identities; the
//! surrounding execution environment is responsible for authenticating
//! which identity a caller actually controls.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A marketplace identity (base58-encoded 32-byte address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from a base58-encoded string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not valid base58 or wrong length.
    pub fn from_base58(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CoreError::invalid_identity(format!("invalid base58: {e}")))?;

        if bytes.len() != 32 {
            return Err(CoreError::invalid_identity(format!(
                "identity must be 32 bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self(s.to_string()))
    }

    /// Create an identity from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns error if bytes are not 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(CoreError::invalid_identity(format!(
                "identity must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bs58::encode(bytes).into_string()))
    }

    /// Get the base58-encoded address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
