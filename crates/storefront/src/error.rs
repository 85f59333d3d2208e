//! Unified error handling.
//!
//! Each component has its own error enum; [`ShelfError`] aggregates them
//! for front ends (the CLI) that surface failures to the user. The state
//! core itself never fails on storage problems, so `Storage` only appears
//! when a front end touches a backend directly.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog seed could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Reading page markup or another input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShelfError {
    /// Message suitable for showing to a shopper.
    ///
    /// Internal details (paths, parse positions) are hidden.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(CheckoutError::EmptyCart) => {
                "Your cart is empty. Add something before checking out.".to_string()
            }
            Self::Cart(CartError::UnknownProduct(_)) => "That product is unavailable".to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Config(_) | Self::Catalog(_) => "The store is misconfigured".to_string(),
            Self::Checkout(_) | Self::Storage(_) | Self::Io(_) => {
                "Something went wrong".to_string()
            }
        }
    }
}

/// Result type alias for `ShelfError`.
pub type Result<T> = std::result::Result<T, ShelfError>;

#[cfg(test)]
mod tests {
    use shelf_core::ProductId;

    use super::*;

    #[test]
    fn test_shelf_error_display() {
        let err = ShelfError::from(CartError::UnknownProduct(ProductId::new("999")));
        assert_eq!(err.to_string(), "Cart error: unknown product: 999");

        let err = ShelfError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Your cart is empty");
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = ShelfError::from(StorageError::InvalidKey("../x".to_string()));
        assert_eq!(err.user_message(), "Something went wrong");

        let err = ShelfError::from(CheckoutError::EmptyCart);
        assert!(err.user_message().starts_with("Your cart is empty"));

        let err = ShelfError::from(CartError::InvalidQuantity);
        assert_eq!(err.user_message(), "quantity must be at least 1");
    }
}
