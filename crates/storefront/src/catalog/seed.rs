//! Static product seed.
//!
//! The built-in list backs the catalog when no seed file is given. Seed
//! files are YAML (JSON is accepted too, being valid YAML):
//!
//! ```yaml
//! products:
//!   - id: "101"
//!     title: Pineapple Soap
//!     price: 1099
//!     image: /img/soap.jpg
//!     url: /products/soap
//!     variantRef: "44012"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use shelf_core::{Price, Product, ProductId, VariantRef};
use thiserror::Error;
use tracing::info;

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("seed file {path} has {count} validation errors")]
    Invalid { path: PathBuf, count: usize },
}

/// A problem found in a seed list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedIssue {
    #[error("product #{position} has an empty id")]
    EmptyId { position: usize },

    #[error("product {id} is listed more than once")]
    DuplicateId { id: ProductId },

    #[error("product {id} has a negative price ({price})")]
    NegativePrice { id: ProductId, price: Price },
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    products: Vec<Product>,
}

/// Load and validate a seed file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or parsed, or if
/// [`validate_seed`] reports any issue (each issue is logged).
pub fn load_seed_file(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let seed: SeedFile = serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let issues = validate_seed(&seed.products);
    if !issues.is_empty() {
        for issue in &issues {
            tracing::error!(path = %path.display(), "{issue}");
        }
        return Err(CatalogError::Invalid {
            path: path.to_path_buf(),
            count: issues.len(),
        });
    }

    info!(path = %path.display(), products = seed.products.len(), "Loaded catalog seed");
    Ok(seed.products)
}

/// Check a seed list for empty ids, duplicate ids and negative prices.
#[must_use]
pub fn validate_seed(products: &[Product]) -> Vec<SeedIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (position, product) in products.iter().enumerate() {
        if product.id.is_empty() {
            issues.push(SeedIssue::EmptyId { position });
            continue;
        }
        if !seen.insert(product.id.as_str()) {
            issues.push(SeedIssue::DuplicateId {
                id: product.id.clone(),
            });
        }
        if product.price.amount() < 0 {
            issues.push(SeedIssue::NegativePrice {
                id: product.id.clone(),
                price: product.price,
            });
        }
    }

    issues
}

/// The built-in product list.
#[must_use]
pub fn default_products() -> Vec<Product> {
    [
        ("101", "Pineapple Soap", 1099, "soap", "44012"),
        ("102", "Coconut Body Butter", 1899, "body-butter", "44013"),
        ("103", "Mango Lip Balm", 599, "lip-balm", "44014"),
        ("104", "Passionfruit Face Mist", 1499, "face-mist", "44015"),
        ("105", "Guava Sugar Scrub", 1699, "sugar-scrub", ""),
        ("106", "Gift Card", 2500, "gift-card", ""),
    ]
    .into_iter()
    .map(|(id, title, price, handle, variant)| Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::new(price),
        image: format!("/static/images/products/{handle}.jpg"),
        url: format!("/products/{handle}"),
        variant_ref: VariantRef::new(variant),
    })
    .collect()
}
