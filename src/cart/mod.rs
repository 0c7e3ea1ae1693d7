//! Cart
//!
//! Session-wide cart and purchase state. The [`CartStore`] is the only owner of
//! the cart lines and purchased ids; every change goes through its mutators,
//! and totals are recomputed from the lines on each read.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::books::BookId;

pub mod purchased;

pub use purchased::PurchasedBooks;

/// A book as handed to [`CartStore::add_to_cart`].
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
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
}

/// One distinct book held in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Book id, unique within the cart
    pub id: BookId,

    /// Title
    pub title: String,

    /// Author
    pub author: String,

    /// Cover image URL
    pub cover: String,

    /// Unit price, fixed when the line was created
    pub price: Money<'static, Currency>,

    quantity: u32,
}

impl CartLine {
    fn from_item(item: CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            author: item.author,
            cover: item.cover,
            price: item.price,
            quantity: 1,
        }
    }

    /// Number of copies; never below 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity, in minor units.
    pub fn total_minor(&self) -> i64 {
        self.price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity))
    }
}

/// Cart and purchase state for one storefront session.
#[derive(Debug, Clone)]
pub struct CartStore {
    lines: SmallVec<[CartLine; 8]>,
    purchased: PurchasedBooks,
    currency: &'static Currency,
}

impl CartStore {
    /// Create an empty store pricing everything in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: SmallVec::new(),
            purchased: PurchasedBooks::default(),
            currency,
        }
    }

    /// Add one copy of a book.
    ///
    /// If the book already has a line its quantity goes up by one and the line
    /// is otherwise left untouched; if not, a new line with quantity 1 is
    /// appended. An item priced in another currency keeps its amount but is
    /// re-denominated into the store currency.
    pub fn add_to_cart(&mut self, mut item: CartItem) {
        if item.price.currency() != self.currency {
            warn!(
                book_id = %item.id,
                item_currency = item.price.currency().iso_alpha_code,
                store_currency = self.currency.iso_alpha_code,
                "re-denominating cart item into store currency"
            );

            item.price = redenominate(&item.price, self.currency);
        }

        if let Some(line) = self.line_mut(item.id.as_str()) {
            line.quantity = line.quantity.saturating_add(1);

            debug!(book_id = %line.id, quantity = line.quantity, "incremented cart line");

            return;
        }

        debug!(book_id = %item.id, "added cart line");

        self.lines.push(CartLine::from_item(item));
    }

    /// Remove the line for `id`. Does nothing if there is none.
    pub fn remove_from_cart(&mut self, id: &str) {
        let before = self.lines.len();

        self.lines.retain(|line| line.id.as_str() != id);

        if self.lines.len() != before {
            debug!(book_id = id, "removed cart line");
        }
    }

    /// Set the quantity for `id`, raising anything below 1 to 1.
    ///
    /// Never removes a line; does nothing if `id` is not in the cart.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        let clamped = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(id) {
            line.quantity = clamped;

            debug!(book_id = id, requested = quantity, quantity = clamped, "updated cart quantity");
        }
    }

    /// Empty the cart. Purchases are kept.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total_price(&self) -> Money<'static, Currency> {
        let minor = self
            .lines
            .iter()
            .map(CartLine::total_minor)
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor, self.currency)
    }

    /// Total number of copies in the cart.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Move every book in the cart into the purchased set and empty the cart.
    ///
    /// Returns the ids that were in the cart. Calling this with an empty cart
    /// changes nothing.
    pub fn purchase_books(&mut self) -> Vec<BookId> {
        let ids: Vec<BookId> = self.lines.iter().map(|line| line.id.clone()).collect();

        for id in &ids {
            self.purchased.insert(id.clone());
        }

        debug!(
            purchased_count = ids.len(),
            owned_count = self.purchased.len(),
            "purchased cart"
        );

        self.clear_cart();

        ids
    }

    /// Whether the book has been purchased this session.
    pub fn is_purchased(&self, id: &str) -> bool {
        self.purchased.contains(id)
    }

    /// Purchased books, oldest first.
    pub fn purchased(&self) -> &PurchasedBooks {
        &self.purchased
    }

    /// Cart lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if the book is in the cart.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id.as_str() == id)
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id.as_str() == id)
    }

    /// Number of distinct books in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency totals are reported in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Same amount, expressed in `currency`'s minor units.
fn redenominate(
    price: &Money<'static, Currency>,
    currency: &'static Currency,
) -> Money<'static, Currency> {
    let scale = Decimal::from(10_u64.saturating_pow(currency.exponent));

    let minor = price
        .amount()
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .unwrap_or(if price.amount().is_sign_negative() { i64::MIN } else { i64::MAX });

    Money::from_minor(minor, currency)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    fn item(id: &str, minor: i64) -> CartItem {
        CartItem {
            id: BookId::new(id),
            title: format!("Title {id}"),
            author: "Author".to_string(),
            price: Money::from_minor(minor, iso::USD),
            cover: String::new(),
        }
    }

    #[test]
    fn add_to_cart_inserts_new_line_with_quantity_one() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));

        assert_eq!(store.len(), 1);
        assert_eq!(store.line("b1").map(CartLine::quantity), Some(1));
    }

    #[test]
    fn add_to_cart_increments_existing_line_and_keeps_its_fields() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));

        let mut repriced = item("b1", 9999);
        repriced.title = "Changed".to_string();
        store.add_to_cart(repriced);

        let line = store.line("b1");

        assert_eq!(store.len(), 1);
        assert_eq!(line.map(CartLine::quantity), Some(2));
        assert_eq!(line.map(|l| l.title.as_str()), Some("Title b1"));
        assert_eq!(line.map(|l| l.price), Some(Money::from_minor(1000, iso::USD)));
    }

    #[test]
    fn remove_from_cart_drops_only_that_line() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));
        store.add_to_cart(item("b2", 500));
        store.remove_from_cart("b1");

        assert!(store.line("b1").is_none());
        assert!(store.line("b2").is_some());
    }

    #[test]
    fn remove_from_cart_missing_id_is_a_no_op() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));
        store.remove_from_cart("nope");

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_quantity_clamps_zero_and_negative_to_one() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));

        store.update_quantity("b1", 0);
        assert_eq!(store.line("b1").map(CartLine::quantity), Some(1));

        store.update_quantity("b1", -7);
        assert_eq!(store.line("b1").map(CartLine::quantity), Some(1));

        store.update_quantity("b1", 4);
        assert_eq!(store.line("b1").map(CartLine::quantity), Some(4));
    }

    #[test]
    fn update_quantity_missing_id_is_a_no_op() {
        let mut store = CartStore::new(iso::USD);

        store.update_quantity("b1", 3);

        assert!(store.is_empty());
    }

    #[test]
    fn totals_are_sums_over_lines() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1299));
        store.add_to_cart(item("b2", 850));
        store.update_quantity("b2", 3);

        assert_eq!(store.total_price(), Money::from_minor(1299 + 3 * 850, iso::USD));
        assert_eq!(store.item_count(), 4);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let store = CartStore::new(iso::GBP);

        assert_eq!(store.total_price(), Money::from_minor(0, iso::GBP));
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn clear_cart_keeps_purchases() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));
        store.purchase_books();
        store.add_to_cart(item("b2", 1000));
        store.clear_cart();

        assert!(store.is_empty());
        assert!(store.is_purchased("b1"));
    }

    #[test]
    fn purchase_books_moves_lines_into_purchased() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));
        store.add_to_cart(item("b2", 1000));

        let bought = store.purchase_books();

        assert_eq!(bought, [BookId::new("b1"), BookId::new("b2")]);
        assert_eq!(store.item_count(), 0);
        assert!(store.is_purchased("b1"));
        assert!(store.is_purchased("b2"));
        assert!(!store.is_purchased("b3"));
    }

    #[test]
    fn purchase_books_with_empty_cart_changes_nothing() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));
        store.purchase_books();

        let bought = store.purchase_books();

        assert!(bought.is_empty());
        assert_eq!(store.purchased().len(), 1);
    }

    #[test]
    fn foreign_currency_item_is_priced_in_store_currency() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));

        let mut euro = item("b2", 1000);
        euro.price = Money::from_minor(1000, iso::EUR);
        store.add_to_cart(euro);

        assert_eq!(
            store.line("b2").map(|line| line.price),
            Some(Money::from_minor(1000, iso::USD))
        );
        assert_eq!(store.total_price(), Money::from_minor(2000, iso::USD));
    }

    #[test]
    fn redenominating_rescales_minor_units() {
        let mut store = CartStore::new(iso::USD);

        let mut yen = item("b1", 0);
        yen.price = Money::from_minor(500, iso::JPY);
        store.add_to_cart(yen);

        assert_eq!(store.total_price(), Money::from_minor(50_000, iso::USD));
        assert!(
            store
                .lines()
                .iter()
                .all(|line| line.price.currency() == store.currency()),
            "every line should be priced in the store currency"
        );
    }

    #[test]
    fn repurchasing_an_owned_book_does_not_duplicate_it() {
        let mut store = CartStore::new(iso::USD);

        store.add_to_cart(item("b1", 1000));
        store.purchase_books();
        store.add_to_cart(item("b1", 1000));
        store.purchase_books();

        assert_eq!(store.purchased().len(), 1);
    }
}
