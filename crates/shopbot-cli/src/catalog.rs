//! Offline catalog commands: snapshot search and intent inspection.

use std::path::Path;

use shopbot_catalog::{
    extract_product_intent, render_product_summary, ProductSearch, SnapshotCatalog,
};

/// Ranks the records in `snapshot` against `query` and renders the result the
/// way the webhook would put it into a prompt.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or parsed.
pub(crate) fn search_snapshot(
    snapshot: &Path,
    brand: Option<&str>,
    query: &str,
) -> anyhow::Result<String> {
    let catalog = SnapshotCatalog::open(snapshot)?;
    let search = match brand {
        Some(brand) => ProductSearch::default().with_priority_brand(brand),
        None => ProductSearch::default(),
    };
    let products = search.search(query, catalog.records());
    tracing::info!(
        records = catalog.records().len(),
        matched = products.len(),
        "snapshot searched"
    );
    Ok(render_product_summary(&products))
}

pub(crate) fn describe_intent(message: &str) -> String {
    let intent = extract_product_intent(message);
    if !intent.has_product_intent {
        return "no product intent detected".to_string();
    }
    format!(
        "search terms: {}\nsearch query: {}",
        intent.search_terms.join(", "),
        intent.search_query
    )
}
