//! Shelf storefront library.
//!
//! The client-side state core of a headless storefront: a catalog index
//! built from a seed list and rendered product cards, a persisted cart and
//! wishlist, hosted checkout links, catalog search and the timers behind
//! search-as-you-type and toasts. Rendering is left to the caller, which
//! consumes the [`view`] types and listens for [`state::ShopEvent`]s.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod search;
pub mod state;
pub mod storage;
pub mod store;
pub mod timer;
pub mod view;
pub mod wishlist;

pub use config::ShelfConfig;
pub use error::{Result, ShelfError};
pub use state::{ShopContext, ShopEvent};
