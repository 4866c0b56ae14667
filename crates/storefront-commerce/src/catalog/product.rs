//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Supplied by the remote catalog and never modified locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category label (e.g., "men's clothing").
    #[serde(default)]
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Customer rating summary.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Create a product with just the fields the cart cares about.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rating {
    /// Average score.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_ENTRY: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_parse_catalog_entry() {
        let product: Product = serde_json::from_str(CATALOG_ENTRY).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Money::new(10995));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_optional_display_fields_default() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "title": "Mug", "price": 7}"#).unwrap();
        assert_eq!(product, Product::new(ProductId::new(2), "Mug", Money::new(700)));
    }

    #[test]
    fn test_missing_price_rejected() {
        let result = serde_json::from_str::<Product>(r#"{"id": 2, "title": "Mug"}"#);
        assert!(result.is_err());
    }
}
