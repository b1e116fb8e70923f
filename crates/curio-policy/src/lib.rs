//! # curio-policy
//!
//! Transfer policies for the Curio marketplace.
//!
//! A transfer policy is a per-collection rule set governing how minted
//! assets may move: whether sales must pass through escrow, whether direct
//! transfers are allowed, and which market identities may broker sales.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod policy;

pub use error::{PolicyError, Result};
pub use policy::{PolicyFlags, TransferPolicy};
