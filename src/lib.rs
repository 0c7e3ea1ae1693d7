//! Bookstall
//!
//! Bookstall is the domain core of an e-book storefront: a read-only catalog with
//! browsing and search, a session cart with checkout, and a paginated reader
//! that gates unpurchased books behind a free preview.

pub mod access;
pub mod books;
pub mod cart;
pub mod catalog;
pub mod context;
pub mod fixtures;
pub mod prelude;
pub mod reader;
pub mod receipt;
pub mod storage;
