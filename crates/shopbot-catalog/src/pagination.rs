//! WooCommerce page-number pagination via response headers.
//!
//! The WordPress REST API reports the page count in `X-WP-TotalPages` and
//! links adjacent pages in the `Link` header:
//!
//! ```text
//! <https://shop.example.com/wp-json/wc/v3/products?per_page=50&page=1>; rel="prev",
//! <https://shop.example.com/wp-json/wc/v3/products?per_page=50&page=3>; rel="next"
//! ```

/// Header carrying the total number of pages for the current query.
pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Parses a `Link` header value and returns the `page` number of the
/// `rel="next"` link.
///
/// Returns `None` if there is no header, no next link (last page), or the
/// next URL carries no numeric `page` parameter.
#[must_use]
pub fn extract_next_page(link_header: Option<&str>) -> Option<u32> {
    let header = link_header?;

    for segment in header.split(',') {
        let segment = segment.trim();
        if !segment.contains(r#"rel="next""#) {
            continue;
        }
        let url = extract_angle_bracket_url(segment)?;
        return extract_query_param(url, "page").and_then(|page| page.parse().ok());
    }

    None
}

/// Parses the `X-WP-TotalPages` header value.
#[must_use]
pub fn parse_total_pages(header: Option<&str>) -> Option<u32> {
    header.and_then(|value| value.trim().parse().ok())
}

fn extract_angle_bracket_url(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.find('>')?;
    if start >= end {
        return None;
    }
    Some(&segment[start..end])
}

/// Extracts a query parameter without percent-decoding; page numbers never
/// need it.
fn extract_query_param<'a>(url: &'a str, param: &str) -> Option<&'a str> {
    let query_start = url.find('?')? + 1;
    let query = &url[query_start..];

    let needle = format!("{param}=");
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix(needle.as_str()))
        .map(|value| value.split('#').next().unwrap_or(value))
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_none_when_header_is_none() {
        assert!(extract_next_page(None).is_none());
    }

    #[test]
    fn returns_none_when_header_is_empty() {
        assert!(extract_next_page(Some("")).is_none());
    }

    #[test]
    fn extracts_page_from_single_next_link() {
        let header = r#"<https://shop.example.com/wp-json/wc/v3/products?per_page=50&page=2>; rel="next""#;
        assert_eq!(extract_next_page(Some(header)), Some(2));
    }

    #[test]
    fn extracts_page_from_combined_prev_next_link() {
        let header = concat!(
            r#"<https://shop.example.com/wp-json/wc/v3/products?page=1&per_page=50>; rel="prev", "#,
            r#"<https://shop.example.com/wp-json/wc/v3/products?page=3&per_page=50>; rel="next""#
        );
        assert_eq!(extract_next_page(Some(header)), Some(3));
    }

    #[test]
    fn returns_none_on_last_page() {
        let header = r#"<https://shop.example.com/wp-json/wc/v3/products?per_page=50&page=4>; rel="prev""#;
        assert!(extract_next_page(Some(header)).is_none());
    }

    #[test]
    fn does_not_confuse_per_page_with_page() {
        let header = r#"<https://shop.example.com/wp-json/wc/v3/products?per_page=50>; rel="next""#;
        assert!(extract_next_page(Some(header)).is_none());
    }

    #[test]
    fn non_numeric_page_is_ignored() {
        let header = r#"<https://shop.example.com/wp-json/wc/v3/products?page=abc>; rel="next""#;
        assert!(extract_next_page(Some(header)).is_none());
    }

    #[test]
    fn parses_total_pages_header() {
        assert_eq!(parse_total_pages(Some("7")), Some(7));
        assert_eq!(parse_total_pages(Some(" 12 ")), Some(12));
        assert_eq!(parse_total_pages(Some("many")), None);
        assert_eq!(parse_total_pages(None), None);
    }

    #[test]
    fn extract_angle_bracket_url_no_brackets_returns_none() {
        assert!(extract_angle_bracket_url("no brackets here").is_none());
    }
}
