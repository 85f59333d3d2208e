//! Catalog products and cart lines.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, VariantRef};

/// A product as indexed for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product id.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Price in whole currency units.
    #[serde(default)]
    pub price: Price,
    /// Card image URL.
    #[serde(default)]
    pub image: String,
    /// Product page URL.
    #[serde(default)]
    pub url: String,
    /// Hosted checkout variant reference (may be empty).
    #[serde(default)]
    pub variant_ref: VariantRef,
}

/// One cart entry, unique by product id.
///
/// Title, price, image and variant reference are snapshots taken when the
/// line was created; later catalog changes do not touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: Price,
    pub qty: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub variant_ref: VariantRef,
}

impl CartLine {
    /// Create a line for `product` with the given quantity.
    #[must_use]
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            qty,
            image: product.image.clone(),
            variant_ref: product.variant_ref.clone(),
        }
    }

    /// Price of the whole line (`price * qty`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("101"),
            title: "Pineapple Soap".to_string(),
            price: Price::new(1099),
            image: "/img/soap.jpg".to_string(),
            url: "/products/soap".to_string(),
            variant_ref: VariantRef::new("V1"),
        }
    }

    #[test]
    fn test_cart_line_snapshot() {
        let line = CartLine::from_product(&product(), 3);
        assert_eq!(line.title, "Pineapple Soap");
        assert_eq!(line.line_total(), Price::new(3297));
    }

    #[test]
    fn test_cart_line_wire_format() {
        let line = CartLine::from_product(&product(), 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["variantRef"], "V1");
        assert_eq!(json["qty"], 2);
        assert_eq!(json["price"], 1099);
    }

    #[test]
    fn test_cart_line_tolerates_missing_optional_fields() {
        let line: CartLine = serde_json::from_str(r#"{"id":"7","qty":1}"#).unwrap();
        assert!(line.variant_ref.is_empty());
        assert!(line.price.is_zero());
    }
}
