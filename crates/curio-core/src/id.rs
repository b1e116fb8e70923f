//! Typed object identifiers.
//!
//! Every addressable record in the system has its own id newtype so that a
//! listing id can never be passed where a collection id is expected. Ids are
//! prefixed UUIDs, readable in logs and stable across serialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! object_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new random id.
            #[must_use]
            pub fn new() -> Self {
                Self(format!(concat!($prefix, "-{}"), Uuid::new_v4()))
            }

            /// Create from a string.
            #[must_use]
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the id as a string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

object_id!(
    /// Unique collection identifier.
    CollectionId,
    "col"
);

object_id!(
    /// Unique asset (NFT) identifier.
    AssetId,
    "nft"
);

object_id!(
    /// Unique transfer-policy identifier.
    PolicyId,
    "pol"
);

object_id!(
    /// Unique listing identifier.
    ListingId,
    "lst"
);

object_id!(
    /// Unique binding identifier.
    BindingId,
    "bind"
);

object_id!(
    /// Identifier of an external custodial-escrow instance.
    EscrowInstanceId,
    "esc"
);

object_id!(
    /// Identifier of a policy object owned by the external custodial service.
    ExternalPolicyId,
    "xpol"
);
