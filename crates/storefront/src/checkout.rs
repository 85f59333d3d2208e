//! Hosted checkout links.
//!
//! The hosted checkout accepts a cart permalink of the form
//! `<store-origin>/cart/<variant>:<qty>,<variant>:<qty>`. Lines without a
//! variant reference cannot be expressed in the permalink and are left out;
//! when no line has one, the link is the bare store origin.

use shelf_core::CartLine;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Errors starting a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was requested with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The store origin cannot carry a path (e.g. `mailto:`).
    #[error("store origin cannot take a cart path: {0}")]
    OpaqueOrigin(Url),
}

/// Build the checkout permalink for `lines`.
///
/// # Errors
///
/// Returns `CheckoutError::OpaqueOrigin` if `origin` cannot have path
/// segments.
pub fn checkout_url(origin: &Url, lines: &[CartLine]) -> Result<Url, CheckoutError> {
    let pairs: Vec<String> = lines
        .iter()
        .filter(|line| !line.variant_ref.is_empty())
        .map(|line| format!("{}:{}", line.variant_ref, line.qty))
        .collect();

    if pairs.is_empty() {
        return Ok(origin.clone());
    }

    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| CheckoutError::OpaqueOrigin(origin.clone()))?
        .pop_if_empty()
        .push("cart")
        .push(&pairs.join(","));
    Ok(url)
}

/// Gate checkout on a non-empty cart, then build the permalink.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` when `lines` is empty, which the
/// caller shows to the user as a blocking message.
pub fn begin_checkout(origin: &Url, lines: &[CartLine]) -> Result<Url, CheckoutError> {
    if lines.is_empty() {
        warn!("Checkout requested with an empty cart");
        return Err(CheckoutError::EmptyCart);
    }

    let url = checkout_url(origin, lines)?;
    info!(lines = lines.len(), %url, "Redirecting to hosted checkout");
    Ok(url)
}
