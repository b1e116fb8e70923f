//! The escrow listing engine.
//!
//! One state machine per listing:
//!
//! ```text
//! (none) --list--> Active --buy--> Sold
//!                  Active --cancel--> Canceled
//! ```
//!
//! Active is the only non-terminal state. Listings live in a shared
//! [`ListingBook`]; `buy` claims a listing atomically by presenting
//! sufficient payment, so the first valid claimant wins and a consumed id
//! is simply gone. All checks run before any mutation — a failed call
//! leaves the book, the listing, and the event log untouched.

use crate::error::{BuyRejected, MarketError, Result};
use chrono::{DateTime, Utc};
use curio_collection::Nft;
use curio_core::events::{CanceledRecord, ListedRecord, SoldRecord};
use curio_core::{Amount, EventLog, Identity, ListingId, MarketEvent, Payment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An active listing: one escrowed asset awaiting sale or cancellation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing id.
    pub id: ListingId,

    /// The escrowed asset. Owned by the listing; the seller can no longer
    /// use it directly.
    pub asset: Nft,

    /// Asking price, in base units.
    pub price: Amount,

    /// Recorded seller; the only identity that may cancel.
    pub seller: Identity,

    /// Free-form seller note.
    pub note: String,

    /// When the listing was created.
    pub listed_at: DateTime<Utc>,
}

/// What a successful purchase hands to the buyer.
#[derive(Debug)]
pub struct Purchase {
    /// The asset, now owned by the buyer.
    pub asset: Nft,

    /// Exact change: `paid - price`.
    pub change: Payment,
}

/// Shared book of active listings with per-seller proceeds accounting.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListingBook {
    listings: HashMap<ListingId, Listing>,
    proceeds: HashMap<Identity, Amount>,
}

impl ListingBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escrow `asset` for sale at `price`.
    ///
    /// The asset moves into the listing; a [`ListedRecord`] is emitted.
    pub fn list(
        &mut self,
        asset: Nft,
        price: Amount,
        seller: Identity,
        note: impl Into<String>,
        log: &mut EventLog,
    ) -> ListingId {
        let id = ListingId::new();
        let note = note.into();

        tracing::debug!(listing = %id, asset = %asset.id, %price, "asset listed");
        log.record(MarketEvent::Listed(ListedRecord {
            listing: id.clone(),
            asset: asset.id.clone(),
            seller: seller.clone(),
            price,
            note: note.clone(),
        }));

        self.listings.insert(
            id.clone(),
            Listing {
                id: id.clone(),
                asset,
                price,
                seller,
                note,
                listed_at: Utc::now(),
            },
        );
        id
    }

    /// Claim a listing by paying at least its price.
    ///
    /// Splits the payment into exactly `price` (credited to the seller) and
    /// `paid - price` change (returned in the [`Purchase`]), transfers the
    /// asset to the buyer, deletes the listing, and emits a [`SoldRecord`].
    /// These effects commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns a [`BuyRejected`] carrying the buyer's payment back:
    /// [`MarketError::ListingNotFound`] if the id is unknown or already
    /// consumed, [`MarketError::InsufficientPayment`] if the payment is
    /// below the price — the listing then remains Active and unchanged.
    pub fn buy(
        &mut self,
        listing: &ListingId,
        buyer: &Identity,
        payment: Payment,
        log: &mut EventLog,
    ) -> std::result::Result<Purchase, BuyRejected> {
        let Some(entry) = self.listings.get(listing) else {
            return Err(BuyRejected::new(
                MarketError::ListingNotFound {
                    listing: listing.clone(),
                },
                payment,
            ));
        };
        let price = entry.price;
        let paid = payment.value();
        if paid < price {
            return Err(BuyRejected::new(
                MarketError::InsufficientPayment { paid, price },
                payment,
            ));
        }

        // All checks passed; removing the listing is the commit point.
        let Some(entry) = self.listings.remove(listing) else {
            return Err(BuyRejected::new(
                MarketError::ListingNotFound {
                    listing: listing.clone(),
                },
                payment,
            ));
        };
        let (credit, change) = match payment.split(price) {
            Ok(parts) => parts,
            Err(refund) => {
                // Unreachable given the check above; restore the listing
                // and hand the funds back rather than lose either.
                self.listings.insert(entry.id.clone(), entry);
                return Err(BuyRejected::new(
                    MarketError::InsufficientPayment { paid, price },
                    refund,
                ));
            }
        };

        let balance = self.proceeds.entry(entry.seller.clone()).or_default();
        *balance = balance.saturating_add(credit.value());

        tracing::debug!(listing = %entry.id, %price, %paid, "listing sold");
        log.record(MarketEvent::Sold(SoldRecord {
            listing: entry.id,
            asset: entry.asset.id.clone(),
            seller: entry.seller,
            buyer: buyer.clone(),
            price,
        }));

        Ok(Purchase {
            asset: entry.asset,
            change,
        })
    }

    /// Withdraw a listing, returning the escrowed asset to the seller.
    ///
    /// # Errors
    ///
    /// [`MarketError::ListingNotFound`] if the id is unknown or already
    /// consumed; [`MarketError::NotSeller`] if the caller is not the
    /// recorded seller — the listing then remains Active and unchanged.
    pub fn cancel(
        &mut self,
        listing: &ListingId,
        caller: &Identity,
        log: &mut EventLog,
    ) -> Result<Nft> {
        let Some(entry) = self.listings.get(listing) else {
            return Err(MarketError::ListingNotFound {
                listing: listing.clone(),
            });
        };
        if entry.seller != *caller {
            return Err(MarketError::NotSeller {
                listing: listing.clone(),
            });
        }

        let entry = self
            .listings
            .remove(listing)
            .ok_or_else(|| MarketError::ListingNotFound {
                listing: listing.clone(),
            })?;

        tracing::debug!(listing = %entry.id, "listing canceled");
        log.record(MarketEvent::Canceled(CanceledRecord {
            listing: entry.id,
            asset: entry.asset.id.clone(),
            seller: entry.seller,
        }));

        Ok(entry.asset)
    }

    /// Look up an active listing.
    #[must_use]
    pub fn get(&self, listing: &ListingId) -> Option<&Listing> {
        self.listings.get(listing)
    }

    /// Whether a listing is still active.
    #[must_use]
    pub fn is_active(&self, listing: &ListingId) -> bool {
        self.listings.contains_key(listing)
    }

    /// Number of active listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the book has no active listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Accumulated sale proceeds for `seller`.
    #[must_use]
    pub fn proceeds_of(&self, seller: &Identity) -> Amount {
        self.proceeds.get(seller).copied().unwrap_or_default()
    }

    /// Drain a seller's accumulated proceeds into a payment.
    pub fn withdraw_proceeds(&mut self, seller: &Identity) -> Payment {
        let amount = self.proceeds.remove(seller).unwrap_or_default();
        Payment::new(amount)
    }
}
