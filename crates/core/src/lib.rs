//! Shelf Core - Shared types library.
//!
//! This crate provides the types shared across all Shelf components:
//! - `storefront` - Catalog index, cart and wishlist state, checkout links
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids and prices, plus the
//!   product and cart line records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
