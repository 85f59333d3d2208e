//! CLI command implementations.
//!
//! Each command prints its result to stdout; logs go to stderr.

use shelf_storefront::ShelfError;
use thiserror::Error;

#[allow(clippy::print_stdout)]
pub mod cart;
#[allow(clippy::print_stdout)]
pub mod catalog;
#[allow(clippy::print_stdout)]
pub mod checkout;
#[allow(clippy::print_stdout)]
pub mod search;
#[allow(clippy::print_stdout)]
pub mod wishlist;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Shelf(#[from] ShelfError),

    /// `cart clear` on a non-empty cart without `--yes`.
    #[error("refusing to clear {items} items without --yes")]
    NotConfirmed { items: u32 },
}

impl CliError {
    /// Message printed to the user on failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Shelf(err) => err.user_message(),
            Self::NotConfirmed { items } => {
                format!("Your cart has {items} items. Run `shelf cart clear --yes` to empty it.")
            }
        }
    }
}
