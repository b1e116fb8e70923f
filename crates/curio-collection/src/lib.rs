//! # curio-collection
//!
//! Collection registry and asset lifecycle for the Curio marketplace.
//!
//! This crate provides:
//!
//! - [`Collection`] records with mint-mode authorization and supply caps
//! - [`AdminCap`] capability tokens gating privileged collection mutations
//! - [`Nft`] asset records with mint/burn lifecycle

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collection;
pub mod error;
pub mod nft;

pub use collection::{AdminCap, Collection, MintMode};
pub use error::{CollectionError, Result};
pub use nft::{burn, mint, Nft};
