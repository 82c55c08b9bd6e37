//! Catalog sources behind one injectable trait.

use async_trait::async_trait;

use crate::client::WooCommerceClient;
use crate::error::CatalogError;
use crate::record::CatalogRecord;

/// Filters passed to a catalog source.
///
/// Remote sources use them to narrow the fetch; local sources return their
/// full contents and leave narrowing to the relevance search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    /// WooCommerce category id.
    pub category: Option<String>,
    /// Page size for remote sources.
    pub limit: u32,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Anything that can supply raw catalog records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads records for `query`.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see each source.
    async fn load(&self, query: &CatalogQuery) -> Result<Vec<CatalogRecord>, CatalogError>;

    /// Short label used in logs.
    fn kind(&self) -> &'static str;
}

/// Loads from `source`, degrading any failure to an empty catalog.
///
/// A failed catalog load never aborts the conversation flow; it produces an
/// empty search result instead and is logged at `warn`.
pub async fn load_or_empty(source: &dyn CatalogSource, query: &CatalogQuery) -> Vec<CatalogRecord> {
    match source.load(query).await {
        Ok(records) => {
            tracing::debug!(source = source.kind(), count = records.len(), "catalog loaded");
            records
        }
        Err(e) => {
            tracing::warn!(
                source = source.kind(),
                error = %e,
                "catalog load failed, continuing with empty catalog"
            );
            Vec::new()
        }
    }
}

/// Fixed in-memory catalog; ignores the query.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog(pub Vec<CatalogRecord>);

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn load(&self, _query: &CatalogQuery) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.0.clone())
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}

/// Live catalog: one page of published products from the WooCommerce API.
#[derive(Debug)]
pub struct WooCommerceCatalog {
    client: WooCommerceClient,
}

impl WooCommerceCatalog {
    #[must_use]
    pub fn new(client: WooCommerceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for WooCommerceCatalog {
    async fn load(&self, query: &CatalogQuery) -> Result<Vec<CatalogRecord>, CatalogError> {
        let (records, _) = self.client.fetch_products_page(query, 1).await?;
        Ok(records)
    }

    fn kind(&self) -> &'static str {
        "woocommerce"
    }
}
