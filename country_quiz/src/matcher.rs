//! Free-text country matching.
//!
//! Input is folded with [`normalize`] (case, diacritics, whitespace) and
//! compared for exact equality against every spelling in the catalog. There
//! is deliberately no typo tolerance: "Brasil", "BRASIL" and "  brásil " all
//! match, "Brazl" does not.

use crate::catalog::{Catalog, Country};
use std::{collections::HashMap, sync::Arc};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Fold text for comparison.
///
/// Lower-cases, decomposes to NFD and drops combining marks, collapses
/// whitespace runs to a single space and trims. Idempotent.
///
/// ```
/// use country_quiz::matcher::normalize;
///
/// assert_eq!(normalize("  São   Tomé e PRÍNCIPE "), "sao tome e principe");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves player input to catalog entries.
///
/// Normalized spellings are computed once. When two countries share a
/// normalized spelling the one earlier in the catalog wins.
#[derive(Debug)]
pub struct Matcher {
    catalog: Arc<Catalog>,
    keys: HashMap<String, usize>,
}

impl Matcher {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let mut keys = HashMap::with_capacity(catalog.len() * 2);
        for (idx, country) in catalog.iter().enumerate() {
            for spelling in country.spellings() {
                let key = normalize(spelling);
                if !key.is_empty() {
                    keys.entry(key).or_insert(idx);
                }
            }
        }
        Self { catalog, keys }
    }

    /// Find the country named by `input`, if any.
    #[must_use]
    pub fn find(&self, input: &str) -> Option<&Country> {
        let key = normalize(input);
        if key.is_empty() {
            return None;
        }
        self.keys.get(&key).and_then(|&idx| self.catalog.at(idx))
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}
