//! Integration tests for Shelf.
//!
//! Scenarios drive [`ShopContext`] end to end against file storage in a
//! temporary directory. Reopening a context over the same directory stands
//! in for a page reload.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelf-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use tempfile::TempDir;

use shelf_core::Product;
use shelf_storefront::catalog::{self, CatalogIndex};
use shelf_storefront::storage::{FileStorage, KeyValueStorage, StorageError};
use shelf_storefront::{ShelfConfig, ShopContext};

/// A storefront session rooted in its own temporary data directory.
#[derive(Debug)]
pub struct TestShop {
    dir: TempDir,
    config: ShelfConfig,
    catalog: CatalogIndex,
}

impl TestShop {
    /// Create a shop over the built-in products.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Self::with_products(&catalog::default_products())
    }

    /// Create a shop over `products`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn with_products(products: &[Product]) -> io::Result<Self> {
        let dir = TempDir::new()?;
        let config = ShelfConfig {
            data_dir: dir.path().join("store"),
            ..ShelfConfig::default()
        };

        Ok(Self {
            dir,
            config,
            catalog: CatalogIndex::from_products(products),
        })
    }

    /// Replace the catalog with the built-in products merged with the cards
    /// found in `html`.
    #[must_use]
    pub fn with_page(mut self, html: &str) -> Self {
        self.catalog =
            CatalogIndex::build(&catalog::default_products(), &catalog::scan_markup(html));
        self
    }

    /// Open a fresh context, loading whatever a previous one persisted.
    #[must_use]
    pub fn open(&self) -> ShopContext<FileStorage> {
        ShopContext::open(self.config.clone(), self.catalog.clone())
    }

    /// The storage backend the contexts use.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.config.data_dir)
    }

    #[must_use]
    pub const fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Write a raw value under the cart key, bypassing the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn write_raw_cart(&self, value: &str) -> Result<(), StorageError> {
        self.storage().set_item(&self.config.cart_key, value)
    }

    /// Write a raw value under the wishlist key, bypassing the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn write_raw_wishlist(&self, value: &str) -> Result<(), StorageError> {
        self.storage().set_item(&self.config.wishlist_key, value)
    }

    /// Read the raw value stored under the cart key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    pub fn read_raw_cart(&self) -> Result<Option<String>, StorageError> {
        self.storage().get_item(&self.config.cart_key)
    }

    /// Path of the temporary directory.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
