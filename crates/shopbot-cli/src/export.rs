//! `export` command: WooCommerce catalog to snapshot file.

use std::path::Path;

use shopbot_catalog::client::MAX_PER_PAGE;
use shopbot_catalog::{CatalogQuery, SnapshotCatalog, WooCommerceClient};
use shopbot_core::AppConfig;

/// Fetches every page matching the filters and writes the records to
/// `output`. Nothing is written if any page fails.
///
/// # Errors
///
/// Returns an error if WooCommerce credentials are missing, any page request
/// fails, or the snapshot cannot be written.
pub(crate) async fn run_export(
    config: &AppConfig,
    output: &Path,
    search: Option<String>,
    category: Option<String>,
    delay_ms: u64,
) -> anyhow::Result<()> {
    let creds = config.woocommerce_credentials()?;
    let client = WooCommerceClient::new(
        creds.store_url,
        creds.consumer_key,
        creds.consumer_secret,
        config.http_timeout_secs,
        &config.http_user_agent,
        config.http_max_retries,
        config.http_retry_backoff_base_secs,
    )?;

    let query = build_export_query(search, category);
    tracing::info!(
        store = client.origin(),
        search = ?query.search,
        category = ?query.category,
        "exporting catalog"
    );

    let records = client.fetch_all_products(&query, delay_ms).await?;
    SnapshotCatalog::write(output, &records)?;

    println!("exported {} products to {}", records.len(), output.display());
    Ok(())
}

fn build_export_query(search: Option<String>, category: Option<String>) -> CatalogQuery {
    let mut query = CatalogQuery::new(MAX_PER_PAGE);
    if let Some(search) = search {
        query = query.with_search(search);
    }
    if let Some(category) = category {
        query = query.with_category(category);
    }
    query
}
