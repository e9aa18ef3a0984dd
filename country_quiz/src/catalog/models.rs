//! Catalog data models.

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

/// Unique country identifier.
///
/// These are ISO 3166-1 numeric codes kept as zero-padded strings ("076"),
/// the same identifiers world topology datasets attach to their features.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CountryId(String);

impl CountryId {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CountryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Continent tag used to group the country list
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    Africa,
    NorthAmerica,
    SouthAmerica,
    Asia,
    Europe,
    Oceania,
}

impl Continent {
    /// Display order of the continent blocks.
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Asia,
        Continent::Europe,
        Continent::Oceania,
    ];
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continent::Africa => write!(f, "África"),
            Continent::NorthAmerica => write!(f, "América do Norte"),
            Continent::SouthAmerica => write!(f, "América do Sul"),
            Continent::Asia => write!(f, "Ásia"),
            Continent::Europe => write!(f, "Europa"),
            Continent::Oceania => write!(f, "Oceania"),
        }
    }
}

/// Immutable catalog entry
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Country {
    pub id: CountryId,

    /// Canonical display name
    pub name: String,

    pub continent: Continent,

    /// Other accepted spellings (exonyms, regional variants, abbreviations)
    #[serde(default)]
    pub alternates: Vec<String>,

    /// Map anchor latitude in degrees
    #[serde(default)]
    pub lat: f64,

    /// Map anchor longitude in degrees
    #[serde(default)]
    pub lon: f64,
}

impl Country {
    /// Canonical name followed by every alternate spelling.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alternates.iter().map(String::as_str))
    }
}
