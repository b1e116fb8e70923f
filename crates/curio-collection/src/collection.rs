//! Collection records, mint-mode authorization, and supply accounting.
//!
//! A collection is created together with an [`AdminCap`] bound to its id.
//! Privileged mutations check both the capability binding and the caller
//! identity; the two guards defend against different forgery vectors (a
//! stolen capability vs. a capability presented against another collection)
//! and are kept as separate clauses.

use crate::error::{CollectionError, Result};
use chrono::{DateTime, Utc};
use curio_core::{CollectionId, Identity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The rule deciding which identities may mint assets in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintMode {
    /// Only the collection creator may mint.
    Owner,
    /// Anyone may mint.
    Public,
    /// Only whitelisted identities may mint.
    Whitelist,
}

impl MintMode {
    /// Decode a mint mode from its wire code.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidMode`] for unrecognized codes.
    pub const fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Owner),
            1 => Ok(Self::Public),
            2 => Ok(Self::Whitelist),
            _ => Err(CollectionError::InvalidMode { code }),
        }
    }

    /// The wire code of this mode.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Owner => 0,
            Self::Public => 1,
            Self::Whitelist => 2,
        }
    }
}

impl fmt::Display for MintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Public => write!(f, "public"),
            Self::Whitelist => write!(f, "whitelist"),
        }
    }
}

/// Capability token gating privileged operations on one collection.
///
/// Bound to a collection id at creation and never rebindable. Possession is
/// necessary but not sufficient: every privileged operation also re-checks
/// that the caller is the collection's recorded creator.
#[derive(Debug)]
pub struct AdminCap {
    collection: CollectionId,
}

impl AdminCap {
    /// The collection this capability is bound to.
    #[must_use]
    pub const fn collection(&self) -> &CollectionId {
        &self.collection
    }
}

/// A named grouping of assets sharing mint rules and a supply cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection id.
    pub id: CollectionId,

    /// Collection name.
    pub name: String,

    /// Ticker-style symbol.
    pub symbol: String,

    /// Human-readable description.
    pub description: String,

    /// Recorded creator; the only identity admin operations accept.
    pub creator: Identity,

    /// Active mint authorization rule.
    pub mint_mode: MintMode,

    /// Mint whitelist, consulted only in [`MintMode::Whitelist`].
    pub whitelist: BTreeSet<Identity>,

    /// All-time mint counter. Monotone; burns never decrement it.
    total_minted: u64,

    /// Supply cap. Zero means unbounded.
    pub max_supply: u64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Create a collection and its bound admin capability.
    ///
    /// Both belong to `creator`; there are no constraints beyond a
    /// well-formed mint mode, which the [`MintMode`] type already enforces.
    #[must_use]
    pub fn create(
        name: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
        mint_mode: MintMode,
        whitelist: BTreeSet<Identity>,
        max_supply: u64,
        creator: Identity,
    ) -> (Self, AdminCap) {
        let id = CollectionId::new();
        let cap = AdminCap {
            collection: id.clone(),
        };
        let collection = Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            description: description.into(),
            creator,
            mint_mode,
            whitelist,
            total_minted: 0,
            max_supply,
            created_at: Utc::now(),
        };
        (collection, cap)
    }

    /// Check whether `identity` may mint under the current mode.
    ///
    /// Pure predicate, no side effects.
    #[must_use]
    pub fn can_mint(&self, identity: &Identity) -> bool {
        match self.mint_mode {
            MintMode::Owner => *identity == self.creator,
            MintMode::Public => true,
            MintMode::Whitelist => self.whitelist.contains(identity),
        }
    }

    /// Check whether the supply cap admits another mint.
    ///
    /// Exposed separately from mint so the rule stays independently
    /// testable.
    #[must_use]
    pub const fn supply_available(&self) -> bool {
        self.max_supply == 0 || self.total_minted < self.max_supply
    }

    /// All-time mint count.
    #[must_use]
    pub const fn total_minted(&self) -> u64 {
        self.total_minted
    }

    /// Verify the capability binding and the caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Forbidden`] if either guard fails.
    pub fn authorize(&self, cap: &AdminCap, caller: &Identity) -> Result<()> {
        if cap.collection != self.id {
            return Err(CollectionError::forbidden(
                "capability is bound to a different collection",
            ));
        }
        if *caller != self.creator {
            return Err(CollectionError::forbidden(
                "caller is not the collection creator",
            ));
        }
        Ok(())
    }

    /// Replace the mint mode.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Forbidden`] if the capability or caller
    /// check fails.
    pub fn set_mode(&mut self, cap: &AdminCap, caller: &Identity, mode: MintMode) -> Result<()> {
        self.authorize(cap, caller)?;
        self.mint_mode = mode;
        Ok(())
    }

    /// Replace the mint whitelist wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Forbidden`] if the capability or caller
    /// check fails.
    pub fn set_whitelist(
        &mut self,
        cap: &AdminCap,
        caller: &Identity,
        whitelist: BTreeSet<Identity>,
    ) -> Result<()> {
        self.authorize(cap, caller)?;
        self.whitelist = whitelist;
        Ok(())
    }

    /// Replace the supply cap. Zero means unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Forbidden`] if the capability or caller
    /// check fails.
    pub fn set_max_supply(&mut self, cap: &AdminCap, caller: &Identity, max: u64) -> Result<()> {
        self.authorize(cap, caller)?;
        self.max_supply = max;
        Ok(())
    }

    /// Account for one successful mint.
    pub(crate) fn note_mint(&mut self) {
        self.total_minted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn identity(byte: u8) -> Identity {
        Identity::from_bytes(&[byte; 32]).expect("valid identity")
    }

    fn collection(mode: MintMode, whitelist: BTreeSet<Identity>) -> (Collection, AdminCap) {
        Collection::create(
            "Moths",
            "MOTH",
            "nocturnal specimens",
            mode,
            whitelist,
            0,
            identity(1),
        )
    }

    #[test_case(0, Some(MintMode::Owner) ; "owner code")]
    #[test_case(1, Some(MintMode::Public) ; "public code")]
    #[test_case(2, Some(MintMode::Whitelist) ; "whitelist code")]
    #[test_case(3, None ; "unknown code")]
    #[test_case(255, None ; "max code")]
    fn mode_decoding(code: u8, expected: Option<MintMode>) {
        let decoded = MintMode::from_code(code);
        match expected {
            Some(want) => assert_eq!(decoded.ok(), Some(want)),
            None => {
                assert!(matches!(
                    decoded,
                    Err(CollectionError::InvalidMode { code: got }) if got == code
                ));
            }
        }
    }

    #[test]
    fn mode_codes_roundtrip() {
        for mode in [MintMode::Owner, MintMode::Public, MintMode::Whitelist] {
            assert_eq!(MintMode::from_code(mode.code()).ok(), Some(mode));
        }
    }

    #[test]
    fn cap_is_bound_to_collection() {
        let (col, cap) = collection(MintMode::Owner, BTreeSet::new());
        assert_eq!(cap.collection(), &col.id);
    }

    #[test]
    fn owner_mode_admits_only_creator() {
        let (col, _cap) = collection(MintMode::Owner, BTreeSet::new());
        assert!(col.can_mint(&identity(1)));
        assert!(!col.can_mint(&identity(2)));
    }

    #[test]
    fn public_mode_admits_anyone() {
        let (col, _cap) = collection(MintMode::Public, BTreeSet::new());
        assert!(col.can_mint(&identity(1)));
        assert!(col.can_mint(&identity(200)));
    }

    #[test]
    fn whitelist_mode_is_membership() {
        let whitelist = BTreeSet::from([identity(5)]);
        let (col, _cap) = collection(MintMode::Whitelist, whitelist);
        assert!(col.can_mint(&identity(5)));
        assert!(!col.can_mint(&identity(1))); // creator is not exempt
        assert!(!col.can_mint(&identity(6)));
    }

    #[test]
    fn unbounded_supply_always_available() {
        let (mut col, _cap) = collection(MintMode::Public, BTreeSet::new());
        for _ in 0..1000 {
            assert!(col.supply_available());
            col.note_mint();
        }
        assert_eq!(col.total_minted(), 1000);
    }

    #[test]
    fn capped_supply_closes_at_max() {
        let (mut col, cap) = collection(MintMode::Public, BTreeSet::new());
        col.set_max_supply(&cap, &identity(1), 2).expect("creator");
        assert!(col.supply_available());
        col.note_mint();
        assert!(col.supply_available());
        col.note_mint();
        assert!(!col.supply_available());
    }

    #[test]
    fn set_mode_rejects_non_creator() {
        let (mut col, cap) = collection(MintMode::Owner, BTreeSet::new());
        let result = col.set_mode(&cap, &identity(2), MintMode::Public);
        assert!(matches!(result, Err(CollectionError::Forbidden { .. })));
        assert_eq!(col.mint_mode, MintMode::Owner);
    }

    #[test]
    fn set_mode_rejects_foreign_capability() {
        let (mut col, _cap) = collection(MintMode::Owner, BTreeSet::new());
        let (_other, foreign_cap) = collection(MintMode::Owner, BTreeSet::new());
        let result = col.set_mode(&foreign_cap, &identity(1), MintMode::Public);
        assert!(matches!(result, Err(CollectionError::Forbidden { .. })));
    }

    #[test]
    fn set_whitelist_replaces_wholesale() {
        let initial = BTreeSet::from([identity(5), identity(6)]);
        let (mut col, cap) = collection(MintMode::Whitelist, initial);

        let replacement = BTreeSet::from([identity(7)]);
        col.set_whitelist(&cap, &identity(1), replacement)
            .expect("creator");

        assert!(!col.can_mint(&identity(5)));
        assert!(!col.can_mint(&identity(6)));
        assert!(col.can_mint(&identity(7)));
    }

    #[test]
    fn collection_serde_roundtrip() {
        let (col, _cap) = collection(MintMode::Public, BTreeSet::new());
        let json = serde_json::to_string(&col).expect("serialize");
        let parsed: Collection = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.id, col.id);
        assert_eq!(parsed.mint_mode, col.mint_mode);
    }
}
