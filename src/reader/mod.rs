//! Reader
//!
//! Paginated reading of a single book, gated by the [`AccessPolicy`].

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    access::{AccessDecision, AccessPolicy},
    books::{Book, BookId},
    cart::{CartItem, CartStore},
};

pub mod preferences;

pub use preferences::{FontSize, ReaderDisplay, ReaderPreferences, Theme};

/// Reading position in one book.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    item: CartItem,
    description: String,
    total_pages: u32,
    current_page: u32,
    policy: AccessPolicy,
}

impl ReaderSession {
    /// Open `book` at page 1.
    pub fn open(book: &Book, policy: AccessPolicy) -> Self {
        Self {
            item: book.cart_item(),
            description: book.description.clone(),
            total_pages: policy.total_pages(book.pages),
            current_page: 1,
            policy,
        }
    }

    /// Book being read.
    pub fn book_id(&self) -> &BookId {
        &self.item.id
    }

    /// Title of the book being read.
    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Page currently shown.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page count of the book.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the reader owns this book.
    pub fn is_purchased(&self, store: &CartStore) -> bool {
        store.is_purchased(self.item.id.as_str())
    }

    /// Policy decision for the current page.
    pub fn access(&self, store: &CartStore) -> AccessDecision {
        self.policy
            .evaluate(self.is_purchased(store), self.current_page, self.total_pages)
    }

    /// Whether the current page is past the free preview of an unowned book.
    pub fn is_preview_locked(&self, store: &CartStore) -> bool {
        !self.is_purchased(store) && !self.access(store).allowed
    }

    /// Advance one page, stopping at the last readable page.
    pub fn next_page(&mut self, store: &CartStore) -> u32 {
        self.go_to_page(store, self.current_page.saturating_add(1))
    }

    /// Go back one page, stopping at page 1.
    pub fn previous_page(&mut self, store: &CartStore) -> u32 {
        self.go_to_page(store, self.current_page.saturating_sub(1))
    }

    /// Jump to `page`, clamped into the readable range.
    pub fn go_to_page(&mut self, store: &CartStore, page: u32) -> u32 {
        self.current_page = self.access(store).clamp_page(page);

        self.current_page
    }

    /// Whether the back control is enabled.
    pub fn can_go_back(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the forward control is enabled.
    pub fn can_go_forward(&self, store: &CartStore) -> bool {
        self.current_page < self.access(store).effective_max_page
    }

    /// Share of the book read so far.
    pub fn progress(&self) -> Percentage {
        let read = Decimal::from(self.current_page.min(self.total_pages));
        let total = Decimal::from(self.total_pages.max(1));

        Percentage::from(read / total)
    }

    /// Progress in percent points, rounded to one decimal place.
    pub fn progress_points(&self) -> Decimal {
        (self.progress() * Decimal::ONE * Decimal::ONE_HUNDRED).round_dp(1)
    }

    /// Heading for the current page.
    pub fn heading(&self, store: &CartStore) -> String {
        if self.is_purchased(store) {
            format!("Chapter {}", self.current_page)
        } else {
            "Preview".to_string()
        }
    }

    /// Preview text shown to readers who haven't bought the book.
    pub fn preview_text(&self) -> String {
        format!(
            "{}\n\nThis is a preview of the book.\n\nOnly the first {} pages are free. Purchase to unlock all {} pages.",
            self.description,
            self.policy.free_page_threshold(),
            self.total_pages
        )
    }

    /// Put the book in the cart so it can be bought.
    pub fn unlock(&self, store: &mut CartStore) {
        debug!(book_id = %self.item.id, page = self.current_page, "unlock requested from reader");

        store.add_to_cart(self.item.clone());
    }
}
