//! Category fallback table used when the primary search finds nothing.
//!
//! Entries are checked in declaration order and the first entry whose
//! keyword or synonyms appear in the query is the only one applied.

use shopbot_core::Product;

/// A product field a fallback entry filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Categories,
    ActiveIngredient,
}

impl CatalogField {
    #[must_use]
    pub fn value<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            CatalogField::Categories => &product.categories,
            CatalogField::ActiveIngredient => &product.active_ingredient,
        }
    }
}

/// One row of the fallback table.
#[derive(Debug, Clone, Copy)]
pub struct FallbackCategory {
    /// Lowercase category keyword; also the text searched for in `fields`.
    pub keyword: &'static str,
    /// Lowercase query substrings that also select this category.
    pub synonyms: &'static [&'static str],
    /// Product fields that must contain `keyword` for a record to qualify.
    pub fields: &'static [CatalogField],
}

impl FallbackCategory {
    /// Returns `true` when the lowercased query mentions the keyword or any
    /// synonym.
    #[must_use]
    pub fn triggered_by(&self, lowered_query: &str) -> bool {
        lowered_query.contains(self.keyword)
            || self.synonyms.iter().any(|s| lowered_query.contains(s))
    }

    /// Returns `true` when any of the entry's fields contains the keyword.
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        self.fields
            .iter()
            .any(|field| field.value(product).to_lowercase().contains(self.keyword))
    }
}

const CATEGORY_FIELDS: &[CatalogField] = &[CatalogField::Categories, CatalogField::ActiveIngredient];

/// The built-in fallback table, in priority order.
pub const FALLBACK_CATEGORIES: &[FallbackCategory] = &[
    FallbackCategory {
        keyword: "testosteron",
        synonyms: &["testo", "enantat", "cypionat", "propionat", "sustanon"],
        fields: CATEGORY_FIELDS,
    },
    FallbackCategory {
        keyword: "peptide",
        synonyms: &["peptid", "hgh", "wachstumshormon", "bpc", "somatropin"],
        fields: CATEGORY_FIELDS,
    },
    FallbackCategory {
        keyword: "steroide",
        synonyms: &["steroid", "anabolika", "kur", "trenbolon", "nandrolon"],
        fields: CATEGORY_FIELDS,
    },
    FallbackCategory {
        keyword: "tabletten",
        synonyms: &["tablette", "oral", "pillen", "kapseln"],
        fields: CATEGORY_FIELDS,
    },
    FallbackCategory {
        keyword: "fatburner",
        synonyms: &["fett", "abnehmen", "diät", "clenbuterol", "definition"],
        fields: CATEGORY_FIELDS,
    },
];

/// Returns the first table entry triggered by `lowered_query`.
#[must_use]
pub fn first_triggered<'t>(
    table: &'t [FallbackCategory],
    lowered_query: &str,
) -> Option<&'t FallbackCategory> {
    table.iter().find(|entry| entry.triggered_by(lowered_query))
}
