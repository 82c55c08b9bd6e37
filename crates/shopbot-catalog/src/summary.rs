//! Plain-text rendering of ranked products for the completion prompt.

use shopbot_core::Product;

/// Summary text used when no product matched.
pub const NO_PRODUCTS_FOUND: &str = "Keine Produkte gefunden.";

const PRICE_ON_REQUEST: &str = "Preis auf Anfrage";
const AVAILABLE: &str = "✅ Verfügbar";
const UNAVAILABLE: &str = "❌ Nicht verfügbar";

/// Renders one block per product, separated by blank lines.
///
/// ```text
/// • Ripomed 250 (44.90€) - ✅ Verfügbar
///   Hersteller: Medi Pharma
///   Wirkstoff: Testosteron Enantat
///   Kategorien: Steroide, Injektionen
///   Link: https://shop.example.com/produkt/ripomed-250/
///   Testosteron Enantat 250 mg/ml
/// ```
///
/// Empty fields are omitted, as is the availability suffix when the stock
/// status is unknown.
#[must_use]
pub fn render_product_summary(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_PRODUCTS_FOUND.to_string();
    }
    products
        .iter()
        .map(render_product)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_product(product: &Product) -> String {
    let availability = match product.is_available() {
        Some(true) => format!(" - {AVAILABLE}"),
        Some(false) => format!(" - {UNAVAILABLE}"),
        None => String::new(),
    };
    let mut lines = vec![format!(
        "• {} ({}){availability}",
        product.name,
        format_price(product)
    )];

    for (label, value) in [
        (Some("Hersteller"), &product.manufacturer),
        (Some("Wirkstoff"), &product.active_ingredient),
        (Some("Kategorien"), &product.categories),
        (Some("Link"), &product.permalink),
        (None, &product.short_description),
    ] {
        if value.is_empty() {
            continue;
        }
        lines.push(match label {
            Some(label) => format!("  {label}: {value}"),
            None => format!("  {value}"),
        });
    }
    lines.join("\n")
}

fn format_price(product: &Product) -> String {
    product
        .effective_price()
        .map_or_else(|| PRICE_ON_REQUEST.to_string(), |price| format!("{price:.2}€"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ripomed() -> Product {
        Product {
            name: "Ripomed 250".to_string(),
            short_description: "Testosteron Enantat 250 mg/ml".to_string(),
            categories: "Steroide, Injektionen".to_string(),
            manufacturer: "Medi Pharma".to_string(),
            active_ingredient: "Testosteron Enantat".to_string(),
            sale_price: Some(44.9),
            regular_price: Some(49.9),
            permalink: "https://shop.example.com/produkt/ripomed-250/".to_string(),
            stock_status: "instock".to_string(),
            ..Product::default()
        }
    }

    #[test]
    fn empty_list_renders_fallback_text() {
        assert_eq!(render_product_summary(&[]), NO_PRODUCTS_FOUND);
    }

    #[test]
    fn full_product_renders_every_line() {
        let rendered = render_product_summary(&[ripomed()]);
        assert_eq!(
            rendered,
            "• Ripomed 250 (44.90€) - ✅ Verfügbar\n  \
             Hersteller: Medi Pharma\n  \
             Wirkstoff: Testosteron Enantat\n  \
             Kategorien: Steroide, Injektionen\n  \
             Link: https://shop.example.com/produkt/ripomed-250/\n  \
             Testosteron Enantat 250 mg/ml"
        );
    }

    #[test]
    fn missing_price_and_stock_status_are_handled() {
        let product = Product {
            name: "Clen 40".to_string(),
            ..Product::default()
        };
        assert_eq!(render_product_summary(&[product]), "• Clen 40 (Preis auf Anfrage)");
    }

    #[test]
    fn out_of_stock_uses_regular_price_without_sale() {
        let product = Product {
            name: "Anavar 10".to_string(),
            regular_price: Some(35.0),
            stock_status: "outofstock".to_string(),
            ..Product::default()
        };
        assert_eq!(
            render_product_summary(&[product]),
            "• Anavar 10 (35.00€) - ❌ Nicht verfügbar"
        );
    }

    #[test]
    fn blocks_are_separated_by_blank_line() {
        let second = Product {
            name: "Clen 40".to_string(),
            ..Product::default()
        };
        let rendered = render_product_summary(&[ripomed(), second]);
        assert_eq!(rendered.matches("\n\n").count(), 1);
        assert!(rendered.ends_with("\n\n• Clen 40 (Preis auf Anfrage)"));
    }
}
