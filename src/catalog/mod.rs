//! Catalog
//!
//! Read-only, ordered collection of books plus the browsing helpers the
//! storefront pages are built from.

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::books::{Book, BookId};

pub mod query;

pub use query::{CatalogQuery, CategoryFilter, ParseSortOrderError, PriceRange, SortOrder};

const BESTSELLER_SHELF: usize = 4;
const TRENDING_SHELF: usize = 6;
const NEW_RELEASE_SHELF: usize = 4;
const RELATED_LIMIT: usize = 6;
const QUICK_SEARCH_LIMIT: usize = 8;

/// Catalog construction errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two records share an id
    #[error("Duplicate book id: {0}")]
    DuplicateBook(BookId),

    /// A record is priced in a different currency (book, book currency, catalog currency)
    #[error("Book {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(BookId, &'static str, &'static str),
}

/// The storefront's book catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    index: FxHashMap<BookId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Build a catalog from records in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if ids repeat or a price is not in `currency`.
    pub fn new(currency: &'static Currency, books: Vec<Book>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (position, book) in books.iter().enumerate() {
            let book_currency = book.price.currency();

            if book_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    book.id.clone(),
                    book_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if index.insert(book.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateBook(book.id.clone()));
            }
        }

        Ok(Self {
            books,
            index,
            currency,
        })
    }

    /// Look up a book by id.
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.index
            .get(id)
            .and_then(|&position| self.books.get(position))
    }

    /// Books in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Currency every price is in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Category names for the filter bar: `All` first, then each category in
    /// the order it first appears.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        let mut categories = vec![CategoryFilter::ALL];

        for book in &self.books {
            if !book.category.is_empty() && seen.insert(book.category.as_str()) {
                categories.push(book.category.as_str());
            }
        }

        categories
    }

    /// Bestseller shelf for the home page.
    pub fn bestsellers(&self) -> Vec<&Book> {
        self.shelf(|book| book.bestseller, BESTSELLER_SHELF)
    }

    /// Trending shelf for the home page.
    pub fn trending(&self) -> Vec<&Book> {
        self.shelf(|book| book.trending, TRENDING_SHELF)
    }

    /// New releases shelf for the home page.
    pub fn new_releases(&self) -> Vec<&Book> {
        self.shelf(|book| book.new_release, NEW_RELEASE_SHELF)
    }

    /// Other books in the same category.
    pub fn related(&self, book: &Book) -> Vec<&Book> {
        self.shelf(
            |other| other.category == book.category && other.id != book.id,
            RELATED_LIMIT,
        )
    }

    /// Search-as-you-type results: title, author or category containing the
    /// query as typed, ignoring case. A blank query finds nothing.
    pub fn quick_search(&self, query: &str) -> Vec<&Book> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();

        self.shelf(|book| book.matches(&needle), QUICK_SEARCH_LIMIT)
    }

    fn shelf(&self, include: impl Fn(&Book) -> bool, limit: usize) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|&book| include(book))
            .take(limit)
            .collect()
    }
}
