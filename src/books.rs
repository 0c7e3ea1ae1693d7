//! Books

use std::{borrow::Borrow, fmt};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

/// Stable identifier of a book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Create a book id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BookId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Book record as supplied by the catalog data source.
#[derive(Debug, Clone)]
pub struct Book {
    /// Book id
    pub id: BookId,

    /// Title
    pub title: String,

    /// Author
    pub author: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Cover image URL
    pub cover: String,

    /// Category name, e.g. "Fiction"
    pub category: String,

    /// Average rating out of 5
    pub rating: Decimal,

    /// Number of reviews, used as the popularity signal
    pub reviews: u32,

    /// Page count, if known
    pub pages: Option<u32>,

    /// Blurb shown on the detail page and in the reader preview
    pub description: String,

    /// Featured on the bestseller shelf
    pub bestseller: bool,

    /// Featured on the trending shelf
    pub trending: bool,

    /// Featured on the new releases shelf
    pub new_release: bool,
}

impl Book {
    /// Create a book with the required fields; everything else starts empty.
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money<'static, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price,
            cover: String::new(),
            category: String::new(),
            rating: Decimal::ZERO,
            reviews: 0,
            pages: None,
            description: String::new(),
            bestseller: false,
            trending: false,
            new_release: false,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = rating;
        self
    }

    /// Set the review count.
    #[must_use]
    pub fn with_reviews(mut self, reviews: u32) -> Self {
        self.reviews = reviews;
        self
    }

    /// Set the page count.
    #[must_use]
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Case-insensitive substring match on title, author or category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// The subset of this record the cart keeps.
    pub fn cart_item(&self) -> CartItem {
        CartItem {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            cover: self.cover.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    fn book() -> Book {
        Book::new("b1", "The Midnight Library", "Matt Haig", Money::from_minor(1299, iso::USD))
            .with_category("Fiction")
    }

    #[test]
    fn matches_is_case_insensitive_over_title_author_and_category() {
        let book = book();

        assert!(book.matches("midnight"));
        assert!(book.matches("haig"));
        assert!(book.matches("fic"));
        assert!(!book.matches("history"));
    }

    #[test]
    fn cart_item_copies_display_fields_and_price() {
        let book = book();
        let item = book.cart_item();

        assert_eq!(item.id, BookId::new("b1"));
        assert_eq!(item.title, "The Midnight Library");
        assert_eq!(item.author, "Matt Haig");
        assert_eq!(item.price, Money::from_minor(1299, iso::USD));
    }

    #[test]
    fn book_id_borrows_as_str() {
        let id = BookId::from("b42");
        let borrowed: &str = id.borrow();

        assert_eq!(borrowed, "b42");
        assert_eq!(id.to_string(), "b42");
    }
}
