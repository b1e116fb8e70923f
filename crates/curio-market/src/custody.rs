//! Interface to the external custodial-escrow service.
//!
//! The service itself lives outside this system; everything here is the
//! seam it is called through, plus an in-memory implementation used by
//! tests and local development. The delegation registry in
//! [`crate::binding`] only validates and audits — custody of assets and
//! funds on this path belongs entirely to the service behind this trait.

use crate::error::{BuyRejected, MarketError, Result};
use curio_collection::Nft;
use curio_core::{Amount, AssetId, EscrowInstanceId, ExternalPolicyId, Identity, Payment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owner capability for one external escrow instance.
///
/// Returned by [`CustodialEscrow::create`] and required for every
/// privileged call on that instance.
#[derive(Debug)]
pub struct EscrowOwnerCap {
    instance: EscrowInstanceId,
}

impl EscrowOwnerCap {
    /// The instance this capability controls.
    #[must_use]
    pub const fn instance(&self) -> &EscrowInstanceId {
        &self.instance
    }
}

/// Proof that a purchase completed on the custodial service.
///
/// Opaque to callers; [`CustodialEscrow::confirm`] opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentReceipt {
    asset: AssetId,
    amount: Amount,
    payer: Identity,
}

impl FulfillmentReceipt {
    /// Build a receipt. Only custodial implementations should call this.
    #[must_use]
    pub const fn new(asset: AssetId, amount: Amount, payer: Identity) -> Self {
        Self {
            asset,
            amount,
            payer,
        }
    }
}

/// The external custodial-escrow service, as consumed by this system.
pub trait CustodialEscrow {
    /// Provision a fresh escrow instance and its owner capability.
    fn create(&mut self) -> (EscrowInstanceId, EscrowOwnerCap);

    /// Place an asset into custody on an instance.
    fn place(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: Nft,
    ) -> Result<()>;

    /// List a held asset for sale at `price`.
    fn list(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: &AssetId,
        price: Amount,
    ) -> Result<()>;

    /// Withdraw a listing, keeping the asset in custody.
    fn delist(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: &AssetId,
    ) -> Result<()>;

    /// Purchase a listed asset. Returns the asset and a receipt; a
    /// rejected purchase returns the payment inside the error.
    fn purchase(
        &mut self,
        instance: &EscrowInstanceId,
        asset: &AssetId,
        buyer: &Identity,
        payment: Payment,
    ) -> std::result::Result<(Nft, FulfillmentReceipt), BuyRejected>;

    /// Open a receipt against the service's own policy object.
    fn confirm(
        &self,
        policy: &ExternalPolicyId,
        receipt: FulfillmentReceipt,
    ) -> Result<(AssetId, Amount, Identity)>;

    /// Withdraw accumulated sale proceeds. `None` drains everything.
    fn withdraw(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        amount: Option<Amount>,
    ) -> Result<Payment>;

    /// Take an unlisted asset back out of custody.
    fn take(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: &AssetId,
    ) -> Result<Nft>;
}

#[derive(Debug, Default)]
struct InstanceState {
    held: HashMap<AssetId, Nft>,
    listed: HashMap<AssetId, Amount>,
    proceeds: Amount,
}

/// In-memory custodial escrow, for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryCustody {
    instances: HashMap<EscrowInstanceId, InstanceState>,
}

impl InMemoryCustody {
    /// Create an empty custody service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn instance_mut(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
    ) -> Result<&mut InstanceState> {
        if cap.instance != *instance {
            return Err(MarketError::custody(
                "capability is bound to a different instance",
            ));
        }
        self.instances
            .get_mut(instance)
            .ok_or_else(|| MarketError::custody(format!("unknown instance {instance}")))
    }
}

impl CustodialEscrow for InMemoryCustody {
    fn create(&mut self) -> (EscrowInstanceId, EscrowOwnerCap) {
        let instance = EscrowInstanceId::new();
        self.instances
            .insert(instance.clone(), InstanceState::default());
        let cap = EscrowOwnerCap {
            instance: instance.clone(),
        };
        (instance, cap)
    }

    fn place(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: Nft,
    ) -> Result<()> {
        let state = self.instance_mut(instance, cap)?;
        state.held.insert(asset.id.clone(), asset);
        Ok(())
    }

    fn list(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: &AssetId,
        price: Amount,
    ) -> Result<()> {
        let state = self.instance_mut(instance, cap)?;
        if !state.held.contains_key(asset) {
            return Err(MarketError::custody(format!("asset {asset} not in custody")));
        }
        state.listed.insert(asset.clone(), price);
        Ok(())
    }

    fn delist(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: &AssetId,
    ) -> Result<()> {
        let state = self.instance_mut(instance, cap)?;
        if state.listed.remove(asset).is_none() {
            return Err(MarketError::custody(format!("asset {asset} not listed")));
        }
        Ok(())
    }

    fn purchase(
        &mut self,
        instance: &EscrowInstanceId,
        asset: &AssetId,
        buyer: &Identity,
        payment: Payment,
    ) -> std::result::Result<(Nft, FulfillmentReceipt), BuyRejected> {
        let Some(state) = self.instances.get_mut(instance) else {
            return Err(BuyRejected::new(
                MarketError::custody(format!("unknown instance {instance}")),
                payment,
            ));
        };

        let Some(price) = state.listed.get(asset).copied() else {
            return Err(BuyRejected::new(
                MarketError::custody(format!("asset {asset} not listed")),
                payment,
            ));
        };
        let paid = payment.value();
        if paid < price {
            return Err(BuyRejected::new(
                MarketError::InsufficientPayment { paid, price },
                payment,
            ));
        }

        // First mutation: a missing held entry still refunds cleanly.
        let Some(nft) = state.held.remove(asset) else {
            return Err(BuyRejected::new(
                MarketError::custody(format!("asset {asset} not in custody")),
                payment,
            ));
        };
        state.listed.remove(asset);
        state.proceeds = state.proceeds.saturating_add(paid);

        let receipt = FulfillmentReceipt::new(asset.clone(), paid, buyer.clone());
        Ok((nft, receipt))
    }

    fn confirm(
        &self,
        _policy: &ExternalPolicyId,
        receipt: FulfillmentReceipt,
    ) -> Result<(AssetId, Amount, Identity)> {
        Ok((receipt.asset, receipt.amount, receipt.payer))
    }

    fn withdraw(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        amount: Option<Amount>,
    ) -> Result<Payment> {
        let state = self.instance_mut(instance, cap)?;
        let requested = amount.unwrap_or(state.proceeds);
        let remaining = state.proceeds.checked_sub(requested).ok_or_else(|| {
            MarketError::custody(format!(
                "requested {requested}, only {} available",
                state.proceeds
            ))
        })?;
        state.proceeds = remaining;
        Ok(Payment::new(requested))
    }

    fn take(
        &mut self,
        instance: &EscrowInstanceId,
        cap: &EscrowOwnerCap,
        asset: &AssetId,
    ) -> Result<Nft> {
        let state = self.instance_mut(instance, cap)?;
        if state.listed.contains_key(asset) {
            return Err(MarketError::custody(format!(
                "asset {asset} is listed; delist first"
            )));
        }
        state
            .held
            .remove(asset)
            .ok_or_else(|| MarketError::custody(format!("asset {asset} not in custody")))
    }
}
