//! Catalog Queries
//!
//! Filter and sort options for the catalog page. Options are closed types with
//! explicit defaults; free-form strings are parsed into them at the edge.

use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{books::Book, catalog::Catalog};

/// Sort option string wasn't recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown sort order: {0} (expected popular, price-low, price-high or rating)")]
pub struct ParseSortOrderError(String);

/// Catalog ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most reviewed first
    #[default]
    Popular,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// Highest rated first
    Rating,
}

impl SortOrder {
    /// Every option, in the order the sort menu lists them.
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Popular,
        SortOrder::Rating,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
    ];

    /// Option value as used in URLs and menus.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Rating => "rating",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Popular => "Most Popular",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
            SortOrder::Rating => "Highest Rated",
        }
    }

    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortOrder::Popular => b.reviews.cmp(&a.reviews),
            SortOrder::PriceLow => a.price.amount().cmp(b.price.amount()),
            SortOrder::PriceHigh => b.price.amount().cmp(a.price.amount()),
            SortOrder::Rating => b.rating.cmp(&a.rating),
        }
    }

    /// Stable sort of `books` in this order.
    pub fn sort(self, books: &mut [&Book]) {
        books.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == value)
            .ok_or_else(|| ParseSortOrderError(value.to_string()))
    }
}

/// Category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// Exactly this category
    Named(String),
}

impl CategoryFilter {
    /// Label of the catch-all entry.
    pub const ALL: &'static str = "All";

    /// Parse a filter-bar label; `All` selects everything.
    pub fn from_label(label: &str) -> Self {
        if label == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    fn includes(&self, book: &Book) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => book.category == *name,
        }
    }
}

/// Inclusive price bounds, in the catalog currency's major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lower bound
    pub min: Decimal,

    /// Upper bound
    pub max: Decimal,
}

impl PriceRange {
    /// Bounds of the price slider.
    pub const DEFAULT_MAX: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

    /// Create a range; bounds are swapped if given backwards.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `amount` falls inside the range.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Self::DEFAULT_MAX)
    }
}

/// Search, filter and sort settings for the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Free-text search over title, author and category
    pub search: String,

    /// Category filter
    pub category: CategoryFilter,

    /// Price bounds
    pub price: PriceRange,

    /// Minimum rating, 0 for any
    pub min_rating: Decimal,

    /// Ordering
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Query with only a search string.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }

    /// Set the category filter.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the price bounds.
    #[must_use]
    pub fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    /// Set the minimum rating.
    #[must_use]
    pub fn with_min_rating(mut self, min_rating: Decimal) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// Set the ordering.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a single book passes every filter.
    pub fn matches(&self, book: &Book) -> bool {
        let needle = self.search.to_lowercase();

        self.matches_with(book, &needle)
    }

    fn matches_with(&self, book: &Book, needle: &str) -> bool {
        (needle.is_empty() || book.matches(needle))
            && self.category.includes(book)
            && self.price.contains(*book.price.amount())
            && book.rating >= self.min_rating
    }

    /// Matching books from `catalog`, sorted.
    pub fn apply<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Book> {
        let needle = self.search.to_lowercase();

        let mut books: Vec<&Book> = catalog
            .iter()
            .filter(|book| self.matches_with(book, &needle))
            .collect();

        self.sort.sort(&mut books);

        books
    }

    /// How many filters differ from their defaults (search and sort excluded).
    pub fn active_filter_count(&self) -> usize {
        [
            self.category != CategoryFilter::All,
            self.min_rating > Decimal::ZERO,
            self.price != PriceRange::default(),
        ]
        .into_iter()
        .filter(|&active| active)
        .count()
    }

    /// Reset category, rating and price; keep search and sort.
    pub fn clear_filters(&mut self) {
        self.category = CategoryFilter::All;
        self.min_rating = Decimal::ZERO;
        self.price = PriceRange::default();
    }
}
