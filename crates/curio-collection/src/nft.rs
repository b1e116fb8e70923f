//! Asset (NFT) lifecycle: mint and burn.

use crate::collection::Collection;
use crate::error::{CollectionError, Result};
use curio_core::events::{BurnRecord, MintRecord};
use curio_core::{AssetId, CollectionId, EventLog, Identity, MarketEvent};
use serde::{Deserialize, Serialize};

/// A unique asset record tied to a collection.
///
/// Deliberately not `Clone`: an `Nft` value is the asset, and holding it is
/// what authorizes burning or escrowing it.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    /// Unique asset id.
    pub id: AssetId,

    /// Collection this asset was minted under.
    pub collection: CollectionId,

    /// Asset name.
    pub name: String,

    /// Asset URI (metadata pointer).
    pub uri: String,
}

/// Mint a new asset under `collection` for `recipient`.
///
/// The recipient may differ from the caller (gifting, allowlist drops).
/// Counter increment and asset creation happen under one exclusive borrow
/// of the collection, so they commit together or not at all.
///
/// # Errors
///
/// Returns [`CollectionError::Forbidden`] if the caller fails the
/// collection's mint rule, or [`CollectionError::SupplyExceeded`] if the
/// collection is capped out.
pub fn mint(
    collection: &mut Collection,
    caller: &Identity,
    name: impl Into<String>,
    uri: impl Into<String>,
    recipient: Identity,
    log: &mut EventLog,
) -> Result<Nft> {
    if !collection.can_mint(caller) {
        return Err(CollectionError::forbidden(
            "caller may not mint in this collection",
        ));
    }
    if !collection.supply_available() {
        return Err(CollectionError::SupplyExceeded {
            max_supply: collection.max_supply,
        });
    }

    let name = name.into();
    let uri = uri.into();
    let asset = Nft {
        id: AssetId::new(),
        collection: collection.id.clone(),
        name: name.clone(),
        uri: uri.clone(),
    };
    collection.note_mint();

    tracing::debug!(
        collection = %collection.id,
        asset = %asset.id,
        total_minted = collection.total_minted(),
        "asset minted"
    );
    log.record(MarketEvent::Minted(MintRecord {
        collection: collection.id.clone(),
        recipient,
        asset: asset.id.clone(),
        name,
        uri,
    }));

    Ok(asset)
}

/// Burn an asset, destroying it irreversibly.
///
/// Ownership is the authorization: only the current holder can present the
/// asset by value. The all-time mint counter is unaffected.
pub fn burn(asset: Nft, owner: &Identity, log: &mut EventLog) {
    tracing::debug!(collection = %asset.collection, asset = %asset.id, "asset burned");
    log.record(MarketEvent::Burned(BurnRecord {
        collection: asset.collection,
        owner: owner.clone(),
        asset: asset.id,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::MintMode;
    use std::collections::BTreeSet;

    fn identity(byte: u8) -> Identity {
        Identity::from_bytes(&[byte; 32]).expect("valid identity")
    }

    fn public_collection(max_supply: u64) -> Collection {
        let (collection, _cap) = Collection::create(
            "Moths",
            "MOTH",
            "nocturnal specimens",
            MintMode::Public,
            BTreeSet::new(),
            max_supply,
            identity(1),
        );
        collection
    }

    #[test]
    fn mint_creates_asset_and_counts() {
        let mut col = public_collection(0);
        let mut log = EventLog::new();

        let asset = mint(&mut col, &identity(2), "m1", "ipfs://m1", identity(3), &mut log)
            .expect("public mint");

        assert_eq!(asset.collection, col.id);
        assert_eq!(col.total_minted(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn mint_record_names_recipient_not_caller() {
        let mut col = public_collection(0);
        let mut log = EventLog::new();

        let asset = mint(&mut col, &identity(2), "m1", "ipfs://m1", identity(3), &mut log)
            .expect("public mint");

        let MarketEvent::Minted(record) = &log.entries()[0].event else {
            unreachable!("mint emits a mint record")
        };
        assert_eq!(record.recipient, identity(3));
        assert_eq!(record.asset, asset.id);
        assert_eq!(record.name, "m1");
        assert_eq!(record.uri, "ipfs://m1");
    }

    #[test]
    fn mint_forbidden_leaves_no_trace() {
        let (mut col, _cap) = Collection::create(
            "Moths",
            "MOTH",
            "",
            MintMode::Owner,
            BTreeSet::new(),
            0,
            identity(1),
        );
        let mut log = EventLog::new();

        let result = mint(&mut col, &identity(2), "m1", "u", identity(2), &mut log);

        assert!(matches!(result, Err(CollectionError::Forbidden { .. })));
        assert_eq!(col.total_minted(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn supply_cap_closes_after_max_mints() {
        let mut col = public_collection(3);
        let mut log = EventLog::new();
        let minter = identity(2);

        for i in 0..3 {
            mint(&mut col, &minter, format!("m{i}"), "u", minter.clone(), &mut log)
                .expect("under cap");
        }

        let result = mint(&mut col, &minter, "m3", "u", minter.clone(), &mut log);
        assert!(matches!(
            result,
            Err(CollectionError::SupplyExceeded { max_supply: 3 })
        ));
        assert_eq!(col.total_minted(), 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn unbounded_collection_never_hits_supply() {
        let mut col = public_collection(0);
        let mut log = EventLog::new();
        let minter = identity(2);

        for i in 0..100 {
            mint(&mut col, &minter, format!("m{i}"), "u", minter.clone(), &mut log)
                .expect("unbounded");
        }
        assert_eq!(col.total_minted(), 100);
    }

    #[test]
    fn burn_emits_record_and_keeps_counter() {
        let mut col = public_collection(0);
        let mut log = EventLog::new();
        let holder = identity(2);

        let asset = mint(&mut col, &holder, "m1", "u", holder.clone(), &mut log)
            .expect("public mint");
        let asset_id = asset.id.clone();

        burn(asset, &holder, &mut log);

        assert_eq!(col.total_minted(), 1);
        assert_eq!(log.len(), 2);
        let MarketEvent::Burned(record) = &log.entries()[1].event else {
            unreachable!("burn emits a burn record")
        };
        assert_eq!(record.asset, asset_id);
        assert_eq!(record.owner, holder);
    }
}
