#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};
use std::path::Path;
use vitrine_model::{Catalog, ParseError, Product};

pub const CRATE_NAME: &str = "vitrine-store";

#[derive(Debug)]
#[non_exhaustive]
pub enum FixtureError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Validation(ParseError),
}

impl Display for FixtureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "fixture io error: {e}"),
            Self::Parse(e) => write!(f, "fixture parse error: {e}"),
            Self::Validation(e) => write!(f, "fixture validation error: {e}"),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Validation(e) => Some(e),
        }
    }
}

/// Parses a fixture document (a JSON array of products, the format the
/// seed data ships in) and runs strict validation before the catalog is
/// allowed anywhere near the server.
pub fn catalog_from_json_slice(bytes: &[u8]) -> Result<Catalog, FixtureError> {
    let products: Vec<Product> = serde_json::from_slice(bytes).map_err(FixtureError::Parse)?;
    let catalog = Catalog::new(products);
    catalog.validate().map_err(FixtureError::Validation)?;
    Ok(catalog)
}

/// Loads and validates the fixture file. The returned catalog is the only
/// copy for the process lifetime; callers share it behind an `Arc`.
pub fn load_fixture(path: &Path) -> Result<Catalog, FixtureError> {
    let bytes = std::fs::read(path).map_err(FixtureError::Io)?;
    catalog_from_json_slice(&bytes)
}
