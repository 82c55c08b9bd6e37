//! Store URL handling for the WooCommerce client.

use crate::error::CatalogError;

/// Extracts the scheme+host origin from a store URL.
///
/// Given `"https://shop.example.com/shop/"`, returns
/// `"https://shop.example.com"`, so the REST API is always addressed at the
/// site root regardless of the configured path.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidStoreUrl`] if the URL does not parse or has
/// no host (e.g. `mailto:`).
pub fn extract_store_origin(store_url: &str) -> Result<String, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason,
    };
    let url = reqwest::Url::parse(store_url.trim()).map_err(|e| invalid(e.to_string()))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid("URL has no host".to_owned()));
    }
    Ok(origin.ascii_serialization())
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
