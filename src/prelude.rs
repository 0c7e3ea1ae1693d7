//! Bookstall prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    access::{AccessDecision, AccessPolicy, DEFAULT_TOTAL_PAGES, FREE_PAGE_THRESHOLD},
    books::{Book, BookId},
    cart::{CartItem, CartLine, CartStore, PurchasedBooks},
    catalog::{
        Catalog, CatalogError, CatalogQuery, CategoryFilter, ParseSortOrderError, PriceRange,
        SortOrder,
    },
    context::{ContextError, Storefront},
    fixtures::{Fixture, FixtureError},
    reader::{
        FontSize, ReaderDisplay, ReaderPreferences, ReaderSession, Theme,
        preferences::{FONT_SIZE_KEY, ParseThemeError, THEME_KEY},
    },
    receipt::{Receipt, ReceiptError, ReceiptLine},
    storage::{MemoryStorage, PreferenceStorage, StorageError, YamlFileStorage},
};
