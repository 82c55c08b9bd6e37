//! Internal value-coercion primitives shared by the normalizer.
//!
//! Every function here is total: any JSON value maps to some text or price,
//! never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tags regex"));

/// Separator used when a sequence of values collapses into one text field.
pub(crate) const LIST_SEPARATOR: &str = ", ";

/// Renders a JSON value as plain text.
///
/// Strings are trimmed, scalars use their display form, `null` is empty.
/// Sequences join their non-empty elements with [`LIST_SEPARATOR`] in source
/// order; objects (inside or outside a sequence) contribute their `name` key,
/// which is how WooCommerce encodes categories and tags.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Value::Object(map) => map.get("name").map(value_to_text).unwrap_or_default(),
    }
}

/// Removes HTML tags and collapses runs of whitespace into single spaces.
pub(crate) fn strip_html(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Interprets a JSON value as a price.
///
/// Accepts JSON numbers and decimal strings in either notation: `"49.90"`,
/// `"49,90"`, `"1.299,00 €"`. Empty strings (WooCommerce's "no sale price")
/// and anything unparseable yield `None`.
pub(crate) fn value_to_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_price_text(s),
        _ => None,
    };
    price.filter(|p| p.is_finite())
}

fn parse_price_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('€')
        .trim_start_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        // German notation: '.' groups thousands, ',' marks decimals.
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse::<f64>().ok()
}
