//! Country catalog: the fixed list of countries the quiz asks for.
//!
//! The catalog is loaded once at startup and never mutated. A built-in
//! catalog of 200 countries (Portuguese canonical names with English and
//! European-Portuguese alternates) is embedded in the library; a custom one
//! can be loaded from a JSON file with the same shape.
//!
//! ## Example
//!
//! ```
//! use country_quiz::catalog::{Catalog, Continent};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let brazil = catalog.get("076").unwrap();
//! assert_eq!(brazil.name, "Brasil");
//! assert_eq!(brazil.continent, Continent::SouthAmerica);
//! ```

pub mod errors;
pub mod models;

pub use errors::{CatalogError, CatalogResult};
pub use models::{Continent, Country, CountryId};

use crate::matcher::normalize;
use log::debug;
use std::{collections::HashMap, path::Path};

const BUILTIN_CATALOG: &str = include_str!("../../data/countries.json");

/// Ordered, validated list of countries with an id index
#[derive(Clone, Debug)]
pub struct Catalog {
    countries: Vec<Country>,
    index: HashMap<CountryId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, blank names, duplicate ids and
    /// canonical names that would resolve to another country.
    ///
    /// Spellings are claimed in catalog order, first claim wins, the same
    /// rule the matcher uses. Alternates may be shared; a canonical name may
    /// not.
    pub fn new(countries: Vec<Country>) -> CatalogResult<Self> {
        if countries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(countries.len());
        let mut claims: HashMap<String, usize> = HashMap::new();
        for (idx, country) in countries.iter().enumerate() {
            let key = normalize(&country.name);
            if key.is_empty() {
                return Err(CatalogError::EmptyName(country.id.clone()));
            }
            if index.insert(country.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(country.id.clone()));
            }
            if claims.contains_key(&key) {
                return Err(CatalogError::AmbiguousName {
                    id: country.id.clone(),
                    spelling: country.name.clone(),
                });
            }
            claims.insert(key, idx);
            for alternate in &country.alternates {
                let key = normalize(alternate);
                if !key.is_empty() {
                    claims.entry(key).or_insert(idx);
                }
            }
        }

        debug!("Loaded catalog with {} countries", countries.len());
        Ok(Self { countries, index })
    }

    /// The catalog embedded in the library.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let countries: Vec<Country> = serde_json::from_str(json)?;
        Self::new(countries)
    }

    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Country> {
        self.index.get(id).map(|&idx| &self.countries[idx])
    }

    /// Entry at a catalog position.
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&Country> {
        self.countries.get(position)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    /// Countries of one continent, in catalog order.
    pub fn in_continent(&self, continent: Continent) -> impl Iterator<Item = &Country> {
        self.countries
            .iter()
            .filter(move |country| country.continent == continent)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
