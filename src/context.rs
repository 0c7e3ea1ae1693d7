//! Storefront Context
//!
//! The composition point for a storefront session. It owns the catalog and the
//! session's [`CartStore`]; views borrow both from here. Reading the cart
//! before one has been provided is a usage error and fails immediately.

use thiserror::Error;
use tracing::info;

use crate::{
    access::AccessPolicy,
    books::{Book, BookId},
    cart::{CartLine, CartStore},
    catalog::Catalog,
    reader::ReaderSession,
    receipt::Receipt,
};

/// Storefront usage errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// A consumer asked for the cart before one was provided
    #[error("cart store must be provided to the storefront before it is used")]
    CartNotProvided,

    /// The provided cart prices in a different currency from the catalog (cart, catalog)
    #[error("cart currency {0} does not match catalog currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// No book with this id in the catalog
    #[error("unknown book: {0}")]
    UnknownBook(BookId),
}

/// Catalog, cart and reader policy for one session.
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    cart: Option<CartStore>,
    policy: AccessPolicy,
}

impl Storefront {
    /// Context with a catalog and no cart yet.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: None,
            policy: AccessPolicy::default(),
        }
    }

    /// Start a session: the catalog plus an empty cart in its currency.
    pub fn start_session(catalog: Catalog) -> Self {
        let cart = CartStore::new(catalog.currency());

        info!(book_count = catalog.len(), "storefront session started");

        Self {
            catalog,
            cart: Some(cart),
            policy: AccessPolicy::default(),
        }
    }

    /// Replace the reader access policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Install the session cart.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CurrencyMismatch`] if the cart and catalog disagree on currency.
    pub fn provide_cart(&mut self, cart: CartStore) -> Result<(), ContextError> {
        let cart_currency = cart.currency();
        let catalog_currency = self.catalog.currency();

        if cart_currency != catalog_currency {
            return Err(ContextError::CurrencyMismatch(
                cart_currency.iso_alpha_code,
                catalog_currency.iso_alpha_code,
            ));
        }

        self.cart = Some(cart);

        Ok(())
    }

    /// Builder form of [`Storefront::provide_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CurrencyMismatch`] if the cart and catalog disagree on currency.
    pub fn with_cart(mut self, cart: CartStore) -> Result<Self, ContextError> {
        self.provide_cart(cart)?;

        Ok(self)
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The reader access policy.
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// The session cart.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CartNotProvided`] if no cart has been installed.
    pub fn cart(&self) -> Result<&CartStore, ContextError> {
        self.cart.as_ref().ok_or(ContextError::CartNotProvided)
    }

    /// The session cart, for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CartNotProvided`] if no cart has been installed.
    pub fn cart_mut(&mut self) -> Result<&mut CartStore, ContextError> {
        self.cart.as_mut().ok_or(ContextError::CartNotProvided)
    }

    /// End the session, handing back the cart if there was one.
    pub fn take_cart(&mut self) -> Option<CartStore> {
        self.cart.take()
    }

    /// Look up a catalog book.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnknownBook`] if the id is not in the catalog.
    pub fn book(&self, id: &str) -> Result<&Book, ContextError> {
        self.catalog
            .get(id)
            .ok_or_else(|| ContextError::UnknownBook(BookId::new(id)))
    }

    /// Add one copy of a catalog book to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] if the book is unknown or no cart is installed.
    pub fn add_book(&mut self, id: &str) -> Result<&CartLine, ContextError> {
        let item = self.book(id)?.cart_item();
        let cart = self.cart_mut()?;

        cart.add_to_cart(item);

        cart.line(id)
            .ok_or_else(|| ContextError::UnknownBook(BookId::new(id)))
    }

    /// Whether a book has been purchased this session.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CartNotProvided`] if no cart has been installed.
    pub fn is_purchased(&self, id: &str) -> Result<bool, ContextError> {
        Ok(self.cart()?.is_purchased(id))
    }

    /// Snapshot the cart into a receipt, then purchase everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CartNotProvided`] if no cart has been installed.
    pub fn checkout(&mut self) -> Result<Receipt, ContextError> {
        let cart = self.cart_mut()?;
        let receipt = Receipt::from_cart(cart);

        let purchased = cart.purchase_books();

        info!(
            purchased_count = purchased.len(),
            item_count = receipt.item_count(),
            total = %receipt.total(),
            "checkout complete"
        );

        Ok(receipt)
    }

    /// Purchased books, oldest purchase first.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CartNotProvided`] if no cart has been installed.
    pub fn library(&self) -> Result<Vec<&Book>, ContextError> {
        let cart = self.cart()?;

        Ok(cart
            .purchased()
            .iter()
            .filter_map(|id| self.catalog.get(id.as_str()))
            .collect())
    }

    /// Open the reader for a catalog book.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnknownBook`] if the id is not in the catalog.
    pub fn open_reader(&self, id: &str) -> Result<ReaderSession, ContextError> {
        Ok(ReaderSession::open(self.book(id)?, self.policy))
    }
}
