//! Keyword-based detection of product questions in customer messages.

use serde::Serialize;

/// Product keywords, in the order they are reported.
const PRODUCT_KEYWORDS: &[&str] = &[
    "testosteron",
    "test",
    "tren",
    "trenbolon",
    "anavar",
    "winstrol",
    "dbol",
    "dianabol",
    "deca",
    "equipoise",
    "masteron",
    "primo",
    "primobolan",
    "hgh",
    "wachstumshormon",
    "peptid",
    "fatburner",
    "clenbuterol",
    "medipharma",
    "akra labs",
    "global pharma",
    "steroide",
    "tabletten",
];

/// Result of scanning a message for product keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductIntent {
    pub search_terms: Vec<String>,
    /// `search_terms` joined with single spaces; empty when nothing matched.
    pub search_query: String,
    pub has_product_intent: bool,
}

/// Collects every known product keyword contained in `message`.
///
/// Matching is case-insensitive substring containment, so overlapping
/// keywords (`"test"` inside `"testosteron"`) are all reported.
#[must_use]
pub fn extract_product_intent(message: &str) -> ProductIntent {
    let lowered = message.to_lowercase();
    let search_terms: Vec<String> = PRODUCT_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| (*keyword).to_string())
        .collect();

    ProductIntent {
        search_query: search_terms.join(" "),
        has_product_intent: !search_terms.is_empty(),
        search_terms,
    }
}
