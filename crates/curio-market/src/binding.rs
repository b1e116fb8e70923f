//! Delegation/binding registry for the external custodial-escrow path.
//!
//! A [`Binding`] records which external escrow instance a user is using for
//! a collection. The `prepare_*` functions are stateless gates: they
//! validate policy and binding, emit an audit record, and mutate nothing —
//! the caller composes them with the external service's own calls inside
//! one atomic operation bundle.

use crate::custody::{CustodialEscrow, EscrowOwnerCap};
use crate::error::{MarketError, Result};
use chrono::{DateTime, Utc};
use curio_collection::Collection;
use curio_core::events::{
    BuyPreparedRecord, ListPreparedRecord, ProceedsWithdrawnRecord, SoldRecord,
};
use curio_core::{
    Amount, AssetId, BindingId, CollectionId, EscrowInstanceId, EventLog, Identity, ListingId,
    MarketEvent, Payment,
};
use curio_policy::TransferPolicy;
use serde::{Deserialize, Serialize};

/// A per-user, per-collection pointer to an external escrow instance.
///
/// Purely a lookup/audit record: it is not authoritative over the external
/// instance's actual state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    /// Unique binding id.
    pub id: BindingId,

    /// Collection this binding serves.
    pub collection: CollectionId,

    /// Recorded owner; the only identity that may rebind.
    pub owner: Identity,

    /// The external escrow instance in use.
    external_escrow_ref: EscrowInstanceId,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Binding {
    /// Register a binding for `owner` on `collection`.
    #[must_use]
    pub fn bind(
        collection: CollectionId,
        owner: Identity,
        external_escrow_ref: EscrowInstanceId,
    ) -> Self {
        Self {
            id: BindingId::new(),
            collection,
            owner,
            external_escrow_ref,
            created_at: Utc::now(),
        }
    }

    /// The external escrow instance this binding points at.
    #[must_use]
    pub const fn external_escrow_ref(&self) -> &EscrowInstanceId {
        &self.external_escrow_ref
    }

    /// Point the binding at a different external instance.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NotOwner`] if the caller is not the recorded
    /// owner.
    pub fn rebind(&mut self, caller: &Identity, new_ref: EscrowInstanceId) -> Result<()> {
        if *caller != self.owner {
            return Err(MarketError::NotOwner {
                binding: self.id.clone(),
            });
        }
        self.external_escrow_ref = new_ref;
        Ok(())
    }
}

/// Provision a fresh external escrow instance and bind the caller to it.
///
/// Coordination helper, not new authorization logic: the provider creates
/// the instance and its owner capability, the capability goes to the
/// caller, and a [`Binding`] records the pointer.
pub fn create_and_bind(
    collection: CollectionId,
    caller: &Identity,
    provider: &mut dyn CustodialEscrow,
) -> (Binding, EscrowOwnerCap) {
    let (instance, cap) = provider.create();
    tracing::debug!(%collection, %instance, "external escrow provisioned");
    let binding = Binding::bind(collection, caller.clone(), instance);
    (binding, cap)
}

/// Validate and announce an upcoming listing on the external service.
///
/// Performs no state mutation; on success a [`ListPreparedRecord`] is
/// emitted and the caller proceeds to `place`/`list` on the service within
/// the same atomic bundle.
///
/// # Errors
///
/// [`MarketError::BindMismatch`] if the policy requires escrow and the
/// binding is for a different collection; [`MarketError::Forbidden`] if the
/// caller is not an allowed market under the policy.
pub fn prepare_list(
    collection: &Collection,
    policy: &TransferPolicy,
    binding: &Binding,
    asset: &AssetId,
    price: Amount,
    caller: &Identity,
    note: impl Into<String>,
    log: &mut EventLog,
) -> Result<()> {
    if policy.require_escrow() && binding.collection != collection.id {
        return Err(MarketError::BindMismatch {
            bound: binding.collection.clone(),
            expected: collection.id.clone(),
        });
    }
    if !policy.is_market_allowed(caller) {
        return Err(MarketError::forbidden(
            "caller is not an allowed market under this policy",
        ));
    }

    log.record(MarketEvent::ListPrepared(ListPreparedRecord {
        collection: collection.id.clone(),
        binding: binding.id.clone(),
        asset: asset.clone(),
        seller: caller.clone(),
        price,
        note: note.into(),
    }));
    Ok(())
}

/// Validate and announce an upcoming purchase on the external service.
///
/// Same no-mutation contract as [`prepare_list`]. The binding identifies
/// which external instance the purchase will settle on; it is recorded for
/// the audit trail but grants nothing by itself.
///
/// # Errors
///
/// [`MarketError::Forbidden`] if the caller is not an allowed market under
/// the policy.
pub fn prepare_buy(
    collection: &Collection,
    policy: &TransferPolicy,
    binding: &Binding,
    asset: &AssetId,
    price: Amount,
    caller: &Identity,
    log: &mut EventLog,
) -> Result<()> {
    if !policy.is_market_allowed(caller) {
        return Err(MarketError::forbidden(
            "caller is not an allowed market under this policy",
        ));
    }

    log.record(MarketEvent::BuyPrepared(BuyPreparedRecord {
        collection: collection.id.clone(),
        binding: binding.id.clone(),
        asset: asset.clone(),
        buyer: caller.clone(),
        price,
    }));
    Ok(())
}

/// Emit a trailing [`SoldRecord`] after an external purchase completes.
///
/// Unifies the event stream across both market paths: indexers see the
/// same terminal record whether the sale settled internally or on the
/// custodial service.
pub fn emit_sold(
    listing: ListingId,
    asset: AssetId,
    seller: Identity,
    buyer: Identity,
    price: Amount,
    log: &mut EventLog,
) {
    log.record(MarketEvent::Sold(SoldRecord {
        listing,
        asset,
        seller,
        buyer,
        price,
    }));
}

/// Withdraw sale proceeds from an external escrow instance and audit it.
///
/// # Errors
///
/// Propagates the custodial service's error; nothing is recorded on
/// failure.
pub fn withdraw_proceeds(
    provider: &mut dyn CustodialEscrow,
    instance: &EscrowInstanceId,
    cap: &EscrowOwnerCap,
    recipient: &Identity,
    amount: Option<Amount>,
    log: &mut EventLog,
) -> Result<Payment> {
    let payment = provider.withdraw(instance, cap, amount)?;

    log.record(MarketEvent::ProceedsWithdrawn(ProceedsWithdrawnRecord {
        instance: instance.clone(),
        recipient: recipient.clone(),
        amount: payment.value(),
    }));
    Ok(payment)
}
