//! Core types for Shelf.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use product::{CartLine, Product};
