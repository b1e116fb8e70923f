//! # curio-market
//!
//! Marketplace engine for Curio digital assets.
//!
//! This crate provides:
//!
//! - The escrow listing engine: atomic asset-for-payment exchange with
//!   exact change and exactly-once listing consumption
//! - The delegation/binding registry gating calls into an external
//!   custodial-escrow service
//! - The [`CustodialEscrow`] interface that external service is specified
//!   against, with an in-memory implementation for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod binding;
pub mod custody;
pub mod error;
pub mod listing;

pub use binding::{
    create_and_bind, emit_sold, prepare_buy, prepare_list, withdraw_proceeds, Binding,
};
pub use custody::{CustodialEscrow, EscrowOwnerCap, FulfillmentReceipt, InMemoryCustody};
pub use error::{BuyRejected, MarketError, Result};
pub use listing::{Listing, ListingBook, Purchase};
