//! Shelf CLI - drive the storefront state core from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, merging product cards from a rendered page
//! shelf catalog --page index.html
//!
//! # Add two of product 101 to the cart, then show it
//! shelf cart add 101 2
//! shelf cart show
//!
//! # Decrement a line (removes it at zero)
//! shelf cart qty 101 -1
//!
//! # Toggle a wishlist entry
//! shelf wishlist toggle 103
//!
//! # Print the hosted checkout link
//! shelf checkout
//!
//! # Search the catalog
//! shelf search "lip balm"
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products with cart and wishlist badges
//! - `cart` - Show or change the cart
//! - `wishlist` - Show or toggle wishlist entries
//! - `checkout` - Print the hosted checkout link
//! - `search` - Search product titles
//!
//! Configuration comes from `SHELF_*` environment variables (see
//! `shelf_storefront::config`). Cart and wishlist persist under
//! `SHELF_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_storefront::{ShelfConfig, ShopContext};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(version, about = "Shelf storefront CLI")]
struct Cli {
    /// YAML seed file with the catalog (defaults to the built-in products)
    #[arg(long, global = true, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Rendered page whose product cards are merged into the catalog
    #[arg(long, global = true, value_name = "FILE")]
    page: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog,
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Print the hosted checkout link for the cart
    Checkout,
    /// Search product titles
    Search {
        /// Search terms; every term must appear in the title
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and subtotal
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Change a line's quantity by a signed amount
    Qty {
        /// Product id
        id: String,

        /// Amount to add (negative to decrement)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear {
        /// Confirm clearing a non-empty cart
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add or remove a product
    Toggle {
        /// Product id
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelf_storefront=info,shelf_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        report(&e);
        std::process::exit(1);
    }
}

#[allow(clippy::print_stderr)]
fn report(err: &CliError) {
    eprintln!("{}", err.user_message());
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ShelfConfig::from_env().map_err(shelf_storefront::ShelfError::from)?;
    let catalog = commands::catalog::load(cli.seed.as_deref(), cli.page.as_deref()).await?;
    let mut ctx = ShopContext::open(config, catalog);

    match cli.command {
        Commands::Catalog => commands::catalog::list(&ctx),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id, qty } => commands::cart::add(&mut ctx, &id, qty)?,
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id),
            CartAction::Qty { id, delta } => commands::cart::change_qty(&mut ctx, &id, delta),
            CartAction::Clear { yes } => commands::cart::clear(&mut ctx, yes)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&ctx),
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&mut ctx, &id),
        },
        Commands::Checkout => commands::checkout::run(&ctx)?,
        Commands::Search { query } => commands::search::run(&ctx, &query.join(" ")),
    }
    Ok(())
}
