//! Book Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, JPY, USD},
};
use serde::Deserialize;

use crate::{
    books::{Book, BookId},
    fixtures::FixtureError,
};

/// Wrapper for books in YAML
#[derive(Debug, Deserialize)]
pub struct BooksFixture {
    /// Books in catalog order
    pub books: Vec<BookFixture>,
}

/// Book Fixture
#[derive(Debug, Deserialize)]
pub struct BookFixture {
    /// Book id
    pub id: String,

    /// Title
    pub title: String,

    /// Author
    pub author: String,

    /// Price (e.g., "12.99 USD")
    pub price: String,

    /// Cover image URL
    #[serde(default)]
    pub cover: String,

    /// Category
    pub category: String,

    /// Rating out of 5 (e.g., "4.8")
    #[serde(default)]
    pub rating: Option<String>,

    /// Review count
    #[serde(default)]
    pub reviews: u32,

    /// Page count
    #[serde(default)]
    pub pages: Option<u32>,

    /// Blurb
    #[serde(default)]
    pub description: String,

    /// Bestseller shelf flag
    #[serde(default)]
    pub bestseller: bool,

    /// Trending shelf flag
    #[serde(default)]
    pub trending: bool,

    /// New release shelf flag
    #[serde(default, rename = "newRelease", alias = "new_release")]
    pub new_release: bool,
}

impl TryFrom<BookFixture> for Book {
    type Error = FixtureError;

    fn try_from(fixture: BookFixture) -> Result<Self, Self::Error> {
        let price = parse_book_price(&fixture.price)?;

        let rating = fixture
            .rating
            .as_deref()
            .map(parse_rating)
            .transpose()?
            .unwrap_or(Decimal::ZERO);

        Ok(Book {
            id: BookId::new(fixture.id),
            title: fixture.title,
            author: fixture.author,
            price,
            cover: fixture.cover,
            category: fixture.category,
            rating,
            reviews: fixture.reviews,
            pages: fixture.pages,
            description: fixture.description,
            bestseller: fixture.bestseller,
            trending: fixture.trending,
            new_release: fixture.new_release,
        })
    }
}

/// Parse a book's list price (e.g., "12.99 USD") into money.
///
/// The amount is scaled by the currency's own exponent, so `"1500 JPY"` is
/// 1500 minor units and `"12.99 USD"` is 1299.
///
/// # Errors
///
/// Returns an error if the string is not `AMOUNT CURRENCY`, if the amount is
/// negative or not a decimal, or if the currency is not one the storefront sells in.
pub fn parse_book_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let invalid = || FixtureError::InvalidPrice(s.to_string());

    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match code {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        "JPY" => JPY,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = amount.parse::<Decimal>().map_err(|_err| invalid())?;

    if amount.is_sign_negative() {
        return Err(invalid());
    }

    let minor_units = amount
        .checked_mul(Decimal::from(10_u64.saturating_pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(invalid)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse a rating between 0 and 5 (e.g., "4.5").
///
/// # Errors
///
/// Returns an error if the string is not a decimal in range.
pub fn parse_rating(s: &str) -> Result<Decimal, FixtureError> {
    let rating = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidRating(s.to_string()))?;

    if rating < Decimal::ZERO || rating > Decimal::new(5, 0) {
        return Err(FixtureError::InvalidRating(s.to_string()));
    }

    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_book_price_rejects_invalid_format() {
        let result = parse_book_price("2.99USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));

        let result = parse_book_price("2.99 USD extra");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_book_price_rejects_unknown_currency() {
        let result = parse_book_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_book_price_rejects_negative_amounts() {
        let result = parse_book_price("-1.00 USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_book_price_scales_by_currency_exponent() -> Result<(), FixtureError> {
        assert_eq!(parse_book_price("12.99 USD")?, Money::from_minor(1299, USD));
        assert_eq!(parse_book_price("8 GBP")?, Money::from_minor(800, GBP));
        assert_eq!(parse_book_price("1500 JPY")?, Money::from_minor(1500, JPY));

        Ok(())
    }

    #[test]
    fn parse_rating_checks_range() -> Result<(), FixtureError> {
        assert_eq!(parse_rating("4.8")?, Decimal::new(48, 1));
        assert!(matches!(parse_rating("5.1"), Err(FixtureError::InvalidRating(_))));
        assert!(matches!(parse_rating("great"), Err(FixtureError::InvalidRating(_))));

        Ok(())
    }

    #[test]
    fn fixture_defaults_optional_fields() -> Result<(), FixtureError> {
        let yaml = r#"
id: "7"
title: Dune
author: Frank Herbert
price: "9.99 USD"
category: Science Fiction
"#;

        let fixture: BookFixture = serde_norway::from_str(yaml)?;
        let book = Book::try_from(fixture)?;

        assert_eq!(book.id.as_str(), "7");
        assert_eq!(book.rating, Decimal::ZERO);
        assert_eq!(book.pages, None);
        assert!(!book.bestseller);

        Ok(())
    }
}
