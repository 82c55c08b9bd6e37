//! Raw catalog records as delivered by a catalog source.
//!
//! Records are kept as untyped JSON because field names and shapes differ
//! between sources:
//!
//! - WooCommerce `/wc/v3/products` uses snake_case keys (`short_description`,
//!   `regular_price`), returns prices as decimal strings (`"49.90"`, or `""`
//!   when unset), categories as `[{"id", "name", "slug"}]` objects and brand
//!   data inside `attributes: [{"name": "Hersteller", "options": [...]}]`.
//! - Hand-maintained snapshots use German column names (`Produktname`,
//!   `Wirkstoff`, `Hersteller`) and plain string categories.
//! - A serialized [`shopbot_core::Product`] uses camelCase keys.
//!
//! [`crate::normalize`] reconciles all three.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One product record in whatever shape its source produced.
///
/// Non-object JSON values are accepted and behave as records with no fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord(Value);

impl CatalogRecord {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the first of `keys` that is present with a usable value.
    ///
    /// `null` and blank strings count as absent: WooCommerce sends
    /// `"regular_price": ""` for variable products and fills only `"price"`.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !is_blank(value))
    }

    /// Returns the WooCommerce-style attribute list, or an empty slice.
    #[must_use]
    pub fn attributes(&self) -> &[Value] {
        self.0
            .get("attributes")
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl From<Value> for CatalogRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
