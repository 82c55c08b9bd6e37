use serde::{Deserialize, Serialize};

/// A catalog product in the canonical shape used by search and prompt
/// rendering.
///
/// Every text field is present (possibly empty) and prices are `None` when the
/// source had no usable value, so downstream text handling never needs to deal
/// with missing fields. Serializes with camelCase keys; the serialized form is
/// itself accepted as a raw catalog record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    /// Comma-joined category names, in source order.
    pub categories: String,
    pub manufacturer: String,
    pub active_ingredient: String,
    pub carrier: String,
    pub sale_price: Option<f64>,
    pub regular_price: Option<f64>,
    /// Canonical storefront URL, e.g. `"https://shop.example.com/produkt/ripomed-250"`.
    pub permalink: String,
    /// WooCommerce stock status (`"instock"`, `"outofstock"`, `"onbackorder"`), or empty.
    pub stock_status: String,
}

impl Product {
    /// The price a customer pays right now: the sale price when one is set,
    /// otherwise the regular price.
    #[must_use]
    pub fn effective_price(&self) -> Option<f64> {
        self.sale_price.or(self.regular_price)
    }

    /// Returns `true` when the manufacturer contains `brand_marker`,
    /// compared case-insensitively.
    ///
    /// An empty marker never matches, so an unset brand preference does not
    /// promote every product.
    #[must_use]
    pub fn is_from_brand(&self, brand_marker: &str) -> bool {
        let marker = brand_marker.trim().to_lowercase();
        !marker.is_empty() && self.manufacturer.to_lowercase().contains(&marker)
    }

    /// `Some(true)` for in-stock or backorderable products, `Some(false)` for
    /// out-of-stock ones, `None` when the source did not say.
    #[must_use]
    pub fn is_available(&self) -> Option<bool> {
        match self.stock_status.as_str() {
            "" => None,
            "instock" | "onbackorder" => Some(true),
            _ => Some(false),
        }
    }
}
