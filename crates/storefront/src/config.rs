//! Shelf configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHELF_STORE_ORIGIN` - Hosted store origin for checkout links
//!   (default: `https://shop.example.com`)
//! - `SHELF_DATA_DIR` - Directory backing local storage (default: `.shelf`)
//! - `SHELF_CART_KEY` - Storage key for the cart (default: `shelf.cart`)
//! - `SHELF_WISHLIST_KEY` - Storage key for the wishlist (default: `shelf.wishlist`)
//! - `SHELF_CURRENCY` - ISO 4217 display currency (default: `USD`)
//! - `SHELF_SEARCH_DEBOUNCE_MS` - Search-as-you-type quiet period (default: 250)
//! - `SHELF_TOAST_MS` - Toast display time (default: 2500)
//! - `SHELF_SEARCH_LIMIT` - Maximum search overlay results (default: 8)

use std::path::PathBuf;
use std::time::Duration;

use shelf_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::storage::is_valid_key;

const DEFAULT_STORE_ORIGIN: &str = "https://shop.example.com";
const DEFAULT_DATA_DIR: &str = ".shelf";
const DEFAULT_CART_KEY: &str = "shelf.cart";
const DEFAULT_WISHLIST_KEY: &str = "shelf.wishlist";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 250;
const DEFAULT_TOAST_MS: u64 = 2500;
const DEFAULT_SEARCH_LIMIT: usize = 8;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shelf configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Hosted store origin checkout links are built on
    pub store_origin: Url,
    /// Directory backing file storage
    pub data_dir: PathBuf,
    /// Storage key for cart lines
    pub cart_key: String,
    /// Storage key for wishlist ids
    pub wishlist_key: String,
    /// Display currency
    pub currency: CurrencyCode,
    /// Quiet period before a search-as-you-type query runs
    pub search_debounce: Duration,
    /// How long a toast stays on screen
    pub toast_duration: Duration,
    /// Maximum number of search overlay results
    pub search_limit: usize,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            store_origin: Url::parse(DEFAULT_STORE_ORIGIN)
                .unwrap_or_else(|_| unreachable!("default origin is a valid URL")),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            wishlist_key: DEFAULT_WISHLIST_KEY.to_string(),
            currency: CurrencyCode::default(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl ShelfConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store_origin = parse_origin(
            "SHELF_STORE_ORIGIN",
            &get("SHELF_STORE_ORIGIN", DEFAULT_STORE_ORIGIN),
        )?;
        let data_dir = PathBuf::from(get("SHELF_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = validate_key("SHELF_CART_KEY", get("SHELF_CART_KEY", DEFAULT_CART_KEY))?;
        let wishlist_key = validate_key(
            "SHELF_WISHLIST_KEY",
            get("SHELF_WISHLIST_KEY", DEFAULT_WISHLIST_KEY),
        )?;
        if cart_key == wishlist_key {
            return Err(ConfigError::InvalidEnvVar(
                "SHELF_WISHLIST_KEY".to_string(),
                "must differ from SHELF_CART_KEY".to_string(),
            ));
        }

        let currency = get("SHELF_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHELF_CURRENCY".to_string(), e.to_string()))?;

        let search_debounce = Duration::from_millis(parse_number(
            "SHELF_SEARCH_DEBOUNCE_MS",
            lookup("SHELF_SEARCH_DEBOUNCE_MS"),
            DEFAULT_SEARCH_DEBOUNCE_MS,
        )?);
        let toast_duration = Duration::from_millis(parse_number(
            "SHELF_TOAST_MS",
            lookup("SHELF_TOAST_MS"),
            DEFAULT_TOAST_MS,
        )?);
        let search_limit = parse_number(
            "SHELF_SEARCH_LIMIT",
            lookup("SHELF_SEARCH_LIMIT"),
            DEFAULT_SEARCH_LIMIT,
        )?;

        Ok(Self {
            store_origin,
            data_dir,
            cart_key,
            wishlist_key,
            currency,
            search_debounce,
            toast_duration,
            search_limit,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a store origin: an http(s) URL with a host and no query or
/// fragment.
fn parse_origin(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must have a host".to_string(),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not have a query or fragment".to_string(),
        ));
    }

    Ok(url)
}

fn validate_key(var_name: &str, key: String) -> Result<String, ConfigError> {
    if is_valid_key(&key) {
        Ok(key)
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("'{key}' is not a valid storage key (letters, digits, '.', '_', '-')"),
        ))
    }
}

fn parse_number<T>(var_name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
    })
}
