//! Per-collection transfer policies.

use crate::error::{PolicyError, Result};
use chrono::{DateTime, Utc};
use curio_collection::{AdminCap, Collection};
use curio_core::{CollectionId, ExternalPolicyId, Identity, PolicyId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Behavioral flags of a transfer policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFlags {
    /// Sales must pass through an escrow (internal or custodial).
    pub require_escrow: bool,
    /// Holders may transfer assets directly, outside any market.
    pub allow_direct_transfer: bool,
    /// Any market identity may broker sales; the whitelist is ignored.
    pub allow_public_sale: bool,
}

/// A per-collection rule set governing asset movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPolicy {
    /// Unique policy id.
    pub id: PolicyId,

    /// Collection this policy governs.
    pub collection: CollectionId,

    /// Recorded creator; the only identity mutations accept.
    pub creator: Identity,

    /// Policy name.
    pub name: String,

    /// Behavioral flags.
    flags: PolicyFlags,

    /// Market identities allowed to broker sales when public sale is off.
    whitelist_markets: BTreeSet<Identity>,

    /// Bookkeeping link to a policy object owned by the external custodial
    /// service. Never consulted by this system's own checks.
    external_policy_ref: Option<ExternalPolicyId>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TransferPolicy {
    /// Create a policy for `collection`.
    ///
    /// Only the collection creator may create a policy, gated by the same
    /// capability + identity double check as collection admin operations.
    /// Nothing enforces one policy per collection; callers that want
    /// uniqueness keep their own registry.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Forbidden`] if the capability or caller check
    /// fails.
    pub fn create(
        collection: &Collection,
        cap: &AdminCap,
        caller: &Identity,
        name: impl Into<String>,
        flags: PolicyFlags,
        whitelist_markets: BTreeSet<Identity>,
    ) -> Result<Self> {
        collection.authorize(cap, caller)?;

        Ok(Self {
            id: PolicyId::new(),
            collection: collection.id.clone(),
            creator: caller.clone(),
            name: name.into(),
            flags,
            whitelist_markets,
            external_policy_ref: None,
            created_at: Utc::now(),
        })
    }

    /// Current behavioral flags.
    #[must_use]
    pub const fn flags(&self) -> PolicyFlags {
        self.flags
    }

    /// Whether sales under this policy must pass through escrow.
    #[must_use]
    pub const fn require_escrow(&self) -> bool {
        self.flags.require_escrow
    }

    /// The linked external policy object, if any.
    #[must_use]
    pub const fn external_policy_ref(&self) -> Option<&ExternalPolicyId> {
        self.external_policy_ref.as_ref()
    }

    /// Check whether `market` may broker sales under this policy.
    ///
    /// Public sale admits any identity; otherwise this is a fresh membership
    /// test against the current whitelist. The result is never cached — the
    /// whitelist can change between calls.
    #[must_use]
    pub fn is_market_allowed(&self, market: &Identity) -> bool {
        self.flags.allow_public_sale || self.whitelist_markets.contains(market)
    }

    fn authorize(&self, caller: &Identity) -> Result<()> {
        if *caller != self.creator {
            return Err(PolicyError::forbidden(
                "caller is not the policy creator",
            ));
        }
        Ok(())
    }

    /// Replace the behavioral flags.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Forbidden`] if the caller is not the creator.
    pub fn set_flags(&mut self, caller: &Identity, flags: PolicyFlags) -> Result<()> {
        self.authorize(caller)?;
        self.flags = flags;
        Ok(())
    }

    /// Replace the market whitelist wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Forbidden`] if the caller is not the creator.
    pub fn set_market_whitelist(
        &mut self,
        caller: &Identity,
        markets: BTreeSet<Identity>,
    ) -> Result<()> {
        self.authorize(caller)?;
        self.whitelist_markets = markets;
        Ok(())
    }

    /// Record a link to the external custodial service's own policy object.
    ///
    /// Pure metadata: linking establishes no enforcement relationship.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Forbidden`] if the caller is not the creator.
    pub fn link_official_policy(
        &mut self,
        caller: &Identity,
        external: ExternalPolicyId,
    ) -> Result<()> {
        self.authorize(caller)?;
        self.external_policy_ref = Some(external);
        Ok(())
    }

    /// Remove the external policy link.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Forbidden`] if the caller is not the creator.
    pub fn unlink_official_policy(&mut self, caller: &Identity) -> Result<()> {
        self.authorize(caller)?;
        self.external_policy_ref = None;
        Ok(())
    }
}
