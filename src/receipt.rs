//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    books::BookId,
    cart::{CartLine, CartStore},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// One purchased line on a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Book id
    pub id: BookId,

    /// Title
    pub title: String,

    /// Author
    pub author: String,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// Copies bought
    pub quantity: u32,

    /// Unit price times quantity
    pub total: Money<'static, Currency>,
}

impl ReceiptLine {
    fn from_line(line: &CartLine, currency: &'static Currency) -> Self {
        Self {
            id: line.id.clone(),
            title: line.title.clone(),
            author: line.author.clone(),
            unit_price: line.price,
            quantity: line.quantity(),
            total: Money::from_minor(line.total_minor(), currency),
        }
    }
}

/// Snapshot of the cart taken at checkout.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: SmallVec<[ReceiptLine; 8]>,
    item_count: u64,
    total: Money<'static, Currency>,
}

impl Receipt {
    /// Capture the current cart contents and totals.
    pub fn from_cart(store: &CartStore) -> Self {
        let currency = store.currency();

        Self {
            lines: store
                .lines()
                .iter()
                .map(|line| ReceiptLine::from_line(line, currency))
                .collect(),
            item_count: store.item_count(),
            total: store.total_price(),
        }
    }

    /// Purchased lines in cart order.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Copies purchased.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Amount paid.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Whether nothing was bought.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Prints the receipt as a table followed by the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Title", "Author", "Price", "Qty", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.title.clone(),
                line.author.clone(),
                format!("{}", line.unit_price),
                line.quantity.to_string(),
                format!("{}", line.total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Items: {}", self.item_count)?;
        writeln!(out, " Total: {}", self.total)?;

        Ok(())
    }
}
