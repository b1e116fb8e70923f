//! # curio-core
//!
//! Shared leaf types for the Curio digital-asset marketplace.
//!
//! This crate provides:
//!
//! - Identities (base58 addresses) used for all authorization checks
//! - Typed object ids for collections, assets, policies, listings, bindings
//! - Payment amounts in base units and linear `Payment` resources
//! - Stable event-record schemas consumed by off-chain indexers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod error;
pub mod events;
pub mod id;
pub mod identity;
pub mod payment;

pub use amount::Amount;
pub use error::{CoreError, Result};
pub use events::{EventLog, LoggedEvent, MarketEvent};
pub use id::{AssetId, BindingId, CollectionId, EscrowInstanceId, ExternalPolicyId, ListingId, PolicyId};
pub use identity::Identity;
pub use payment::Payment;
