//! Product catalog access and relevance search.
//!
//! Raw records from any catalog source are normalized into
//! [`shopbot_core::Product`] and ranked by [`search`]. Catalog sources
//! (in-memory, JSON snapshot, WooCommerce REST API) sit behind the
//! [`CatalogSource`] trait so the search itself never performs I/O.

pub mod client;
pub mod error;
pub mod fallback;
pub mod intent;
pub mod normalize;
pub mod pagination;
pub mod record;
pub mod search;
pub mod snapshot;
pub mod source;
pub mod summary;

mod rate_limit;
mod text;

pub use client::{PageInfo, WooCommerceClient};
pub use error::CatalogError;
pub use fallback::{FallbackCategory, FALLBACK_CATEGORIES};
pub use intent::{extract_product_intent, ProductIntent};
pub use normalize::normalize;
pub use record::CatalogRecord;
pub use search::{search, ProductSearch, DEFAULT_PRIORITY_BRAND, MAX_RESULTS};
pub use snapshot::SnapshotCatalog;
pub use source::{load_or_empty, CatalogQuery, CatalogSource, StaticCatalog, WooCommerceCatalog};
pub use summary::{render_product_summary, NO_PRODUCTS_FOUND};
