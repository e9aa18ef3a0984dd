//! Catalog error types.

use super::models::CountryId;
use thiserror::Error;

/// Errors raised while loading a country catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON is malformed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog has no entries
    #[error("Catalog is empty")]
    Empty,

    /// Two entries share an id
    #[error("Duplicate country id: {0}")]
    DuplicateId(CountryId),

    /// An entry has a blank canonical name
    #[error("Country {0} has an empty name")]
    EmptyName(CountryId),

    /// A canonical name normalizes to a spelling another country already owns
    #[error("Country {id} cannot be guessed: '{spelling}' already names another country")]
    AmbiguousName { id: CountryId, spelling: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
