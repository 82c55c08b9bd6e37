//! Multi-page product fetch loop for `WooCommerceClient`.

use std::time::Duration;

use crate::error::CatalogError;
use crate::record::CatalogRecord;
use crate::source::CatalogQuery;

use super::WooCommerceClient;
use super::MAX_PAGES;

impl WooCommerceClient {
    /// Fetches every published product matching `query`, following pages
    /// until the API reports no next page.
    ///
    /// `query.limit` is the page size. `inter_request_delay_ms` is slept
    /// between page requests (not before the first).
    ///
    /// All-or-nothing: on any page failure the products collected so far are
    /// discarded and the error is returned, so a snapshot is never written
    /// from a partial catalog.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`].
    /// Returns [`CatalogError::PaginationLimit`] if more than [`MAX_PAGES`]
    /// pages would be fetched.
    pub async fn fetch_all_products(
        &self,
        query: &CatalogQuery,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<CatalogRecord>, CatalogError> {
        let mut all_products: Vec<CatalogRecord> = Vec::new();
        let mut page = 1u32;
        let mut page_count = 0u32;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(CatalogError::PaginationLimit {
                    store_url: self.origin.clone(),
                    max_pages: MAX_PAGES,
                });
            }

            if page_count > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let (records, info) = self.fetch_products_page(query, page).await?;
            all_products.extend(records);

            match info.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        tracing::info!(
            store = %self.origin,
            pages = page_count,
            count = all_products.len(),
            "fetched full WooCommerce catalog"
        );
        Ok(all_products)
    }
}
