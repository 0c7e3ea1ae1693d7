//! Purchased Books

use rustc_hash::FxHashSet;

use crate::books::BookId;

/// Ids of books bought during the session, in purchase order.
///
/// Each id is held once; buying a book again does not add a second entry.
#[derive(Debug, Clone, Default)]
pub struct PurchasedBooks {
    order: Vec<BookId>,
    members: FxHashSet<BookId>,
}

impl PurchasedBooks {
    /// Record a purchase. Returns `false` if the id was already owned.
    pub fn insert(&mut self, id: BookId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }

        self.order.push(id);

        true
    }

    /// Whether the book has been purchased.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Purchased ids, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &BookId> {
        self.order.iter()
    }

    /// Number of distinct purchased books.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been purchased yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_purchase_order() {
        let mut purchased = PurchasedBooks::default();

        assert!(purchased.insert(BookId::new("b2")));
        assert!(purchased.insert(BookId::new("b1")));

        let ids: Vec<&str> = purchased.iter().map(BookId::as_str).collect();

        assert_eq!(ids, ["b2", "b1"]);
    }

    #[test]
    fn insert_ignores_repeat_purchases() {
        let mut purchased = PurchasedBooks::default();

        purchased.insert(BookId::new("b1"));

        assert!(!purchased.insert(BookId::new("b1")));
        assert_eq!(purchased.len(), 1);
        assert!(purchased.contains("b1"));
        assert!(!purchased.contains("b2"));
    }
}
