//! Event records for off-chain indexing.
//!
//! Each operation that fully succeeds emits exactly one record; a failed
//! operation emits nothing. Field names and the serde layout are stable —
//! external indexers depend on them.

use crate::amount::Amount;
use crate::id::{AssetId, BindingId, CollectionId, EscrowInstanceId, ListingId};
use crate::identity::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A new asset was minted into a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    /// Collection minted under.
    pub collection: CollectionId,
    /// Identity that received the asset.
    pub recipient: Identity,
    /// The new asset.
    pub asset: AssetId,
    /// Asset name.
    pub name: String,
    /// Asset URI.
    pub uri: String,
}

/// An asset was destroyed by its holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnRecord {
    /// Collection the asset belonged to.
    pub collection: CollectionId,
    /// Holder that burned the asset.
    pub owner: Identity,
    /// The destroyed asset.
    pub asset: AssetId,
}

/// An asset was placed in escrow for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedRecord {
    /// The new listing.
    pub listing: ListingId,
    /// The escrowed asset.
    pub asset: AssetId,
    /// Seller identity.
    pub seller: Identity,
    /// Asking price, in base units.
    pub price: Amount,
    /// Free-form seller note.
    pub note: String,
}

/// A listing was fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoldRecord {
    /// The consumed listing.
    pub listing: ListingId,
    /// The asset that changed hands.
    pub asset: AssetId,
    /// Seller identity.
    pub seller: Identity,
    /// Buyer identity.
    pub buyer: Identity,
    /// Price paid to the seller, in base units.
    pub price: Amount,
}

/// A listing was withdrawn by its seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanceledRecord {
    /// The consumed listing.
    pub listing: ListingId,
    /// The asset returned to the seller.
    pub asset: AssetId,
    /// Seller identity.
    pub seller: Identity,
}

/// A listing on the external custodial service was validated and announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPreparedRecord {
    /// Collection of the asset being listed.
    pub collection: CollectionId,
    /// Binding used for the listing.
    pub binding: BindingId,
    /// The asset being listed.
    pub asset: AssetId,
    /// Seller identity.
    pub seller: Identity,
    /// Asking price, in base units.
    pub price: Amount,
    /// Free-form seller note.
    pub note: String,
}

/// A purchase on the external custodial service was validated and announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyPreparedRecord {
    /// Collection of the asset being bought.
    pub collection: CollectionId,
    /// Binding used for the purchase.
    pub binding: BindingId,
    /// The asset being bought.
    pub asset: AssetId,
    /// Buyer identity.
    pub buyer: Identity,
    /// Price offered, in base units.
    pub price: Amount,
}

/// Sale proceeds were withdrawn from an external custodial-escrow instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceedsWithdrawnRecord {
    /// The external escrow instance drained.
    pub instance: EscrowInstanceId,
    /// Identity that received the proceeds.
    pub recipient: Identity,
    /// Amount withdrawn, in base units.
    pub amount: Amount,
}

/// Any record the marketplace can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// Asset minted.
    Minted(MintRecord),
    /// Asset burned.
    Burned(BurnRecord),
    /// Asset listed in the internal escrow engine.
    Listed(ListedRecord),
    /// Listing fulfilled.
    Sold(SoldRecord),
    /// Listing canceled.
    Canceled(CanceledRecord),
    /// External listing prepared.
    ListPrepared(ListPreparedRecord),
    /// External purchase prepared.
    BuyPrepared(BuyPreparedRecord),
    /// External proceeds withdrawn.
    ProceedsWithdrawn(ProceedsWithdrawnRecord),
}

impl MarketEvent {
    /// Short stable name of the event kind, used in structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Minted(_) => "minted",
            Self::Burned(_) => "burned",
            Self::Listed(_) => "listed",
            Self::Sold(_) => "sold",
            Self::Canceled(_) => "canceled",
            Self::ListPrepared(_) => "list_prepared",
            Self::BuyPrepared(_) => "buy_prepared",
            Self::ProceedsWithdrawn(_) => "proceeds_withdrawn",
        }
    }

    /// The listing this event terminates, if it is a terminal listing event.
    #[must_use]
    pub const fn terminal_listing(&self) -> Option<&ListingId> {
        match self {
            Self::Sold(r) => Some(&r.listing),
            Self::Canceled(r) => Some(&r.listing),
            _ => None,
        }
    }
}

/// A recorded event with its emission timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// When the event was recorded.
    pub at: DateTime<Utc>,
    /// The event payload.
    pub event: MarketEvent,
}

/// Append-only log of emitted records.
///
/// An event is appended if and only if the operation that produced it fully
/// succeeded; failed operations leave the log untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, emitting a structured trace line.
    pub fn record(&mut self, event: MarketEvent) {
        tracing::info!(kind = event.kind(), "market event");
        self.entries.push(LoggedEvent {
            at: Utc::now(),
            event,
        });
    }

    /// All recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count terminal records (Sold or Canceled) for a listing.
    ///
    /// The exactly-once lifecycle guarantees this is 0 while the listing is
    /// active and exactly 1 after it has been consumed.
    #[must_use]
    pub fn terminal_count(&self, listing: &ListingId) -> usize {
        self.entries
            .iter()
            .filter(|e| e.event.terminal_listing() == Some(listing))
            .count()
    }
}
