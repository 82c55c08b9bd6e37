//! Normalization from raw [`CatalogRecord`]s to [`shopbot_core::Product`].
//!
//! Value coercion is delegated to [`crate::text`]; this module owns the
//! field alias tables that map each source's key names onto the canonical
//! product fields.

use serde_json::Value;
use shopbot_core::Product;

use crate::record::CatalogRecord;
use crate::text::{strip_html, value_to_price, value_to_text};

const NAME_KEYS: &[&str] = &["name", "title", "Name", "Produktname", "produktname"];
const SHORT_DESCRIPTION_KEYS: &[&str] =
    &["shortDescription", "short_description", "Kurzbeschreibung"];
const LONG_DESCRIPTION_KEYS: &[&str] = &[
    "longDescription",
    "long_description",
    "description",
    "Beschreibung",
];
const CATEGORY_KEYS: &[&str] = &["categories", "category", "Kategorien", "Kategorie"];
const MANUFACTURER_KEYS: &[&str] = &["manufacturer", "Hersteller", "brand", "vendor"];
const ACTIVE_INGREDIENT_KEYS: &[&str] = &["activeIngredient", "active_ingredient", "Wirkstoff"];
const CARRIER_KEYS: &[&str] = &["carrier", "Trägerstoff", "Traegerstoff"];
const SALE_PRICE_KEYS: &[&str] = &["salePrice", "sale_price", "Angebotspreis"];
const REGULAR_PRICE_KEYS: &[&str] = &["regularPrice", "regular_price", "price", "Preis"];
const PERMALINK_KEYS: &[&str] = &["permalink", "url", "link", "Link"];
const STOCK_STATUS_KEYS: &[&str] = &["stockStatus", "stock_status"];

/// Normalizes one raw record into a [`Product`].
///
/// Total over every input: absent or unusable fields become empty strings
/// (text) or `None` (prices). Normalizing the JSON form of a `Product`
/// returns the same `Product`.
#[must_use]
pub fn normalize(record: &CatalogRecord) -> Product {
    Product {
        name: text_field(record, NAME_KEYS),
        short_description: strip_html(&text_field(record, SHORT_DESCRIPTION_KEYS)),
        long_description: strip_html(&text_field(record, LONG_DESCRIPTION_KEYS)),
        categories: text_field(record, CATEGORY_KEYS),
        manufacturer: attribute_backed_field(record, MANUFACTURER_KEYS),
        active_ingredient: attribute_backed_field(record, ACTIVE_INGREDIENT_KEYS),
        carrier: attribute_backed_field(record, CARRIER_KEYS),
        sale_price: record.first_of(SALE_PRICE_KEYS).and_then(value_to_price),
        regular_price: record.first_of(REGULAR_PRICE_KEYS).and_then(value_to_price),
        permalink: text_field(record, PERMALINK_KEYS),
        stock_status: text_field(record, STOCK_STATUS_KEYS),
    }
}

fn text_field(record: &CatalogRecord, keys: &[&str]) -> String {
    record.first_of(keys).map(value_to_text).unwrap_or_default()
}

/// Reads a top-level field, falling back to a WooCommerce product attribute
/// whose name matches one of the same aliases (e.g. `"Hersteller"`).
fn attribute_backed_field(record: &CatalogRecord, keys: &[&str]) -> String {
    let top_level = text_field(record, keys);
    if !top_level.is_empty() {
        return top_level;
    }

    record
        .attributes()
        .iter()
        .find(|attribute| {
            attribute
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| keys.iter().any(|key| key.eq_ignore_ascii_case(name.trim())))
        })
        .and_then(|attribute| attribute.get("options"))
        .map(value_to_text)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
