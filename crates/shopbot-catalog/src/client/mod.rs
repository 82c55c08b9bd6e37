//! HTTP client for the WooCommerce REST API (`/wp-json/wc/v3/products`).

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::pagination::{extract_next_page, parse_total_pages, TOTAL_PAGES_HEADER};
use crate::rate_limit::retry_with_backoff;
use crate::record::CatalogRecord;
use crate::source::CatalogQuery;

pub use origin::extract_store_origin;
#[cfg(test)]
use origin::extract_domain;

/// Maximum number of pages to fetch before returning an error.
///
/// Each page request may be retried up to `max_retries` times, so the
/// worst-case request count is `MAX_PAGES * (1 + max_retries)`.
pub const MAX_PAGES: u32 = 100;

/// Largest `per_page` value the WooCommerce API accepts.
pub const MAX_PER_PAGE: u32 = 100;

const PRODUCTS_PATH: &str = "/wp-json/wc/v3/products";

/// Pagination state reported alongside one page of products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// From `X-WP-TotalPages`, when present.
    pub total_pages: Option<u32>,
    /// Page number of the next page, `None` on the last page.
    pub next_page: Option<u32>,
}

/// Authenticated client for one WooCommerce store.
///
/// Handles rate limiting (429), rejected credentials (401/403), not-found
/// (404) and other non-2xx responses as typed errors. Transient errors (429,
/// network failures) are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct WooCommerceClient {
    client: Client,
    origin: String,
    consumer_key: String,
    consumer_secret: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl std::fmt::Debug for WooCommerceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceClient")
            .field("origin", &self.origin)
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("max_retries", &self.max_retries)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .finish_non_exhaustive()
    }
}

impl WooCommerceClient {
    /// Creates a client with configured timeout, `User-Agent`, and retry
    /// policy. Requests authenticate with HTTP basic auth using the REST API
    /// consumer key and secret.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidStoreUrl`] if `store_url` has no usable
    /// origin, or [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        store_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        let origin = extract_store_origin(store_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            origin,
            consumer_key: consumer_key.to_owned(),
            consumer_secret: consumer_secret.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// The scheme+host the client sends requests to.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fetches one page of published products matching `query`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`CatalogError::Unauthorized`]: HTTP 401/403 (not retried).
    /// - [`CatalogError::NotFound`]: HTTP 404 (not retried).
    /// - [`CatalogError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CatalogError::Http`]: network or TLS failure after all retries.
    /// - [`CatalogError::Deserialize`]: body is not a JSON array.
    pub async fn fetch_products_page(
        &self,
        query: &CatalogQuery,
        page: u32,
    ) -> Result<(Vec<CatalogRecord>, PageInfo), CatalogError> {
        let url = Self::products_url(&self.origin, query, page)?;
        let (records, headers) = self
            .get_json::<Vec<CatalogRecord>>(url, &format!("products page {page}"))
            .await?;

        let total_pages = parse_total_pages(
            headers
                .get(TOTAL_PAGES_HEADER)
                .and_then(|v| v.to_str().ok()),
        );
        let next_page = extract_next_page(
            headers
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok()),
        )
        .or_else(|| total_pages.filter(|&total| page < total).map(|_| page + 1));

        tracing::debug!(
            page,
            count = records.len(),
            ?total_pages,
            ?next_page,
            "fetched WooCommerce products page"
        );
        Ok((
            records,
            PageInfo {
                total_pages,
                next_page,
            },
        ))
    }

    /// Fetches a single product by its WooCommerce id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products_page`]; an unknown id yields
    /// [`CatalogError::NotFound`].
    pub async fn fetch_product_by_id(&self, id: u64) -> Result<CatalogRecord, CatalogError> {
        let url = Self::product_url(&self.origin, id)?;
        let (record, _) = self
            .get_json::<CatalogRecord>(url, &format!("product {id}"))
            .await?;
        Ok(record)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        context: &str,
    ) -> Result<(T, HeaderMap), CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(0);
                    return Err(CatalogError::RateLimited {
                        domain: origin::extract_domain(&url),
                        retry_after_secs,
                    });
                }
                if status == StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound { url });
                }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(CatalogError::Unauthorized {
                        status: status.as_u16(),
                        url,
                    });
                }
                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let headers = response.headers().clone();
                let body = response.text().await?;
                let parsed =
                    serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
                        context: context.to_owned(),
                        source: e,
                    })?;
                Ok((parsed, headers))
            }
        })
        .await
    }

    /// Builds the products listing URL for `query` and `page`.
    ///
    /// `per_page` is `query.limit` clamped to `1..=MAX_PER_PAGE`; only
    /// published products are requested.
    fn products_url(origin: &str, query: &CatalogQuery, page: u32) -> Result<String, CatalogError> {
        let mut url = Self::parse_endpoint(origin, PRODUCTS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("per_page", &query.limit.clamp(1, MAX_PER_PAGE).to_string())
                .append_pair("status", "publish");
            if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
                pairs.append_pair("search", search);
            }
            if let Some(category) = query.category.as_deref().filter(|c| !c.trim().is_empty()) {
                pairs.append_pair("category", category);
            }
            pairs.append_pair("page", &page.max(1).to_string());
        }
        Ok(url.to_string())
    }

    fn product_url(origin: &str, id: u64) -> Result<String, CatalogError> {
        Self::parse_endpoint(origin, &format!("{PRODUCTS_PATH}/{id}")).map(String::from)
    }

    fn parse_endpoint(origin: &str, path: &str) -> Result<reqwest::Url, CatalogError> {
        reqwest::Url::parse(&format!("{origin}{path}")).map_err(|e| CatalogError::InvalidStoreUrl {
            store_url: origin.to_owned(),
            reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
