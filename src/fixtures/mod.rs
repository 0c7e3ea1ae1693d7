//! Fixtures
//!
//! The storefront's book data is shipped as YAML under `fixtures/books/`.

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    books::Book,
    catalog::{Catalog, CatalogError},
    fixtures::books::{BooksFixture, parse_book_price},
};

pub mod books;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid rating
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The fixture has no books, so no currency can be chosen
    #[error("Fixture contains no books; currency unknown")]
    NoBooks,

    /// The books don't form a valid catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture loader
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Loader rooted at `./fixtures`
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Loader rooted at a custom path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load the catalog for a named fixture set from `./fixtures`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid catalog.
    pub fn from_set(name: &str) -> Result<Catalog, FixtureError> {
        Self::new().load_catalog(name)
    }

    /// Load `books/<name>.yml` under the base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid catalog.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        let file_path = self.base_path.join("books").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        debug!(path = %file_path.display(), "loading book fixture");

        catalog_from_yaml(&contents)
    }
}

/// Parse a catalog from YAML. The first book's currency becomes the catalog currency.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a field fails to parse, the
/// fixture is empty, or the books don't form a valid catalog.
pub fn catalog_from_yaml(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: BooksFixture = serde_norway::from_str(yaml)?;

    let first = fixture.books.first().ok_or(FixtureError::NoBooks)?;
    let currency = parse_book_price(&first.price)?.currency();

    let books = fixture
        .books
        .into_iter()
        .map(Book::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = Catalog::new(currency, books)?;

    debug!(
        book_count = catalog.len(),
        currency = currency.iso_alpha_code,
        "loaded catalog"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const TWO_BOOKS: &str = r#"
books:
  - id: "1"
    title: The Midnight Library
    author: Matt Haig
    price: "12.99 USD"
    category: Fiction
    rating: "4.8"
    reviews: 2341
    pages: 304
    bestseller: true
  - id: "2"
    title: Atomic Habits
    author: James Clear
    price: "15.99 USD"
    category: Self-Help
    newRelease: true
"#;

    #[test]
    fn catalog_from_yaml_keeps_order_and_fields() -> TestResult {
        let catalog = catalog_from_yaml(TWO_BOOKS)?;

        let titles: Vec<&str> = catalog.iter().map(|book| book.title.as_str()).collect();

        assert_eq!(titles, ["The Midnight Library", "Atomic Habits"]);
        assert_eq!(catalog.get("1").and_then(|book| book.pages), Some(304));
        assert_eq!(catalog.new_releases().len(), 1);
        assert_eq!(catalog.currency().iso_alpha_code, "USD");

        Ok(())
    }

    #[test]
    fn catalog_from_yaml_rejects_empty_fixture() {
        let result = catalog_from_yaml("books: []\n");

        assert!(matches!(result, Err(FixtureError::NoBooks)));
    }

    #[test]
    fn catalog_from_yaml_rejects_mixed_currencies() {
        let yaml = TWO_BOOKS.replace("15.99 USD", "15.99 GBP");

        let result = catalog_from_yaml(&yaml);

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(..)))
        ));
    }

    #[test]
    fn load_catalog_reads_from_base_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("books"))?;
        fs::write(dir.path().join("books").join("tiny.yml"), TWO_BOOKS)?;

        let catalog = Fixture::with_base_path(dir.path()).load_catalog("tiny")?;

        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn load_catalog_missing_set_is_io_error() {
        let result = Fixture::with_base_path("/nonexistent").load_catalog("demo");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn demo_set_loads() -> TestResult {
        let catalog = Fixture::from_set("demo")?;

        assert!(!catalog.is_empty());

        Ok(())
    }
}
