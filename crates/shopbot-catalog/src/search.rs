//! Relevance search over an in-memory catalog.
//!
//! Matching is plain substring containment on lowercased text, not
//! tokenized or fuzzy matching. Results are ordered brand-priority first,
//! catalog order within each group.

use shopbot_core::Product;

use crate::fallback::{first_triggered, FallbackCategory, FALLBACK_CATEGORIES};
use crate::normalize::normalize;
use crate::record::CatalogRecord;

/// Maximum number of products returned by a search.
pub const MAX_RESULTS: usize = 5;

/// Manufacturer marker whose products are ranked first.
pub const DEFAULT_PRIORITY_BRAND: &str = "medi pharma";

/// Query tokens must be longer than this many characters to be used.
const MIN_TOKEN_CHARS: usize = 2;

/// Per-bucket caps applied to fallback results.
const FALLBACK_PRIORITY_LIMIT: usize = 3;
const FALLBACK_OTHER_LIMIT: usize = 2;

/// Ranks catalog records against a free-text query with the default
/// settings (see [`ProductSearch::default`]).
#[must_use]
pub fn search(query: &str, catalog: &[CatalogRecord]) -> Vec<Product> {
    ProductSearch::default().search(query, catalog)
}

/// Search settings. Stateless and cheap to share across requests.
#[derive(Debug, Clone)]
pub struct ProductSearch {
    /// Case-insensitive manufacturer substring that marks priority products.
    pub priority_brand: String,
    pub max_results: usize,
    /// Category fallback table, consulted in order when nothing matches.
    pub fallback: &'static [FallbackCategory],
}

impl Default for ProductSearch {
    fn default() -> Self {
        Self {
            priority_brand: DEFAULT_PRIORITY_BRAND.to_string(),
            max_results: MAX_RESULTS,
            fallback: FALLBACK_CATEGORIES,
        }
    }
}

impl ProductSearch {
    #[must_use]
    pub fn with_priority_brand(mut self, brand: impl Into<String>) -> Self {
        self.priority_brand = brand.into();
        self
    }

    /// Returns at most `max_results` products matching `query`.
    ///
    /// A record matches when its searchable text contains the whole
    /// lowercased query or any query token longer than two characters.
    /// Priority-brand matches precede all others. When nothing matches at
    /// all, the first fallback category mentioned by the query selects
    /// products by category or active ingredient instead.
    #[must_use]
    pub fn search(&self, query: &str, catalog: &[CatalogRecord]) -> Vec<Product> {
        let lowered = query.to_lowercase();
        let tokens = search_tokens(&lowered);

        let (priority, other): (Vec<Product>, Vec<Product>) = catalog
            .iter()
            .map(normalize)
            .filter(|product| matches_query(&searchable_text(product), &lowered, &tokens))
            .partition(|product| product.is_from_brand(&self.priority_brand));

        if priority.is_empty() && other.is_empty() {
            return self.fallback_search(&lowered, catalog);
        }

        tracing::debug!(
            priority = priority.len(),
            other = other.len(),
            "primary product search matched"
        );
        self.rank(priority, other)
    }

    fn fallback_search(&self, lowered_query: &str, catalog: &[CatalogRecord]) -> Vec<Product> {
        let Some(entry) = first_triggered(self.fallback, lowered_query) else {
            return Vec::new();
        };

        let (mut priority, mut other): (Vec<Product>, Vec<Product>) = catalog
            .iter()
            .map(normalize)
            .filter(|product| entry.admits(product))
            .partition(|product| product.is_from_brand(&self.priority_brand));
        priority.truncate(FALLBACK_PRIORITY_LIMIT);
        other.truncate(FALLBACK_OTHER_LIMIT);

        tracing::debug!(
            category = entry.keyword,
            priority = priority.len(),
            other = other.len(),
            "no direct match; using category fallback"
        );
        self.rank(priority, other)
    }

    fn rank(&self, priority: Vec<Product>, other: Vec<Product>) -> Vec<Product> {
        priority
            .into_iter()
            .chain(other)
            .take(self.max_results)
            .collect()
    }
}

/// Whitespace-separated tokens of an already lowercased query, keeping only
/// tokens longer than two characters.
fn search_tokens(lowered_query: &str) -> Vec<&str> {
    lowered_query
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

/// Lowercased, space-joined text of every non-empty searchable field.
#[must_use]
pub fn searchable_text(product: &Product) -> String {
    [
        product.name.as_str(),
        &product.short_description,
        &product.long_description,
        &product.categories,
        &product.manufacturer,
        &product.active_ingredient,
        &product.carrier,
    ]
    .into_iter()
    .filter(|field| !field.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

fn matches_query(text: &str, lowered_query: &str, tokens: &[&str]) -> bool {
    if lowered_query.trim().is_empty() {
        return false;
    }
    text.contains(lowered_query) || tokens.iter().any(|token| text.contains(token))
}
