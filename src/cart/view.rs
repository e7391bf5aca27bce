//! Cart View

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    books::{Book, BookId},
    cart::{CartError, PrunedEntry},
};

/// A resolved, priced cart entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// The catalog record at read time
    pub book: Book,

    /// Number of copies
    pub quantity: u64,

    /// Unit price times quantity
    pub line_total: Money<'static, Currency>,
}

impl LineItem {
    /// Price a book at the given quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the line total does not fit in minor units.
    pub fn new(book: Book, quantity: u64) -> Result<Self, CartError> {
        let line_minor = i64::try_from(quantity)
            .ok()
            .and_then(|quantity| book.price.to_minor_units().checked_mul(quantity))
            .ok_or(CartError::TotalOverflow)?;

        let line_total = Money::from_minor(line_minor, book.price.currency());

        Ok(Self {
            book,
            quantity,
            line_total,
        })
    }
}

/// Cart contents as of one read.
#[derive(Debug, Clone)]
pub struct CartView {
    items: Vec<LineItem>,
    total: Money<'static, Currency>,
    pruned: SmallVec<[PrunedEntry; 2]>,
}

impl CartView {
    /// An empty cart in `currency`.
    #[must_use]
    pub fn empty(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::from_minor(0, currency),
            pruned: SmallVec::new(),
        }
    }

    /// Build a view from line items already in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if totals overflow or mix currencies.
    pub fn with_items(
        items: Vec<LineItem>,
        currency: &'static Currency,
        pruned: SmallVec<[PrunedEntry; 2]>,
    ) -> Result<Self, CartError> {
        let total = items
            .iter()
            .try_fold(Money::from_minor(0, currency), |acc, item| {
                acc.to_minor_units()
                    .checked_add(item.line_total.to_minor_units())
                    .ok_or(CartError::TotalOverflow)?;

                acc.add(item.line_total).map_err(CartError::from)
            })?;

        Ok(Self {
            items,
            total,
            pruned,
        })
    }

    /// Line items, ascending by book id.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the view, returning its line items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Whether the cart has no valid entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct books.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of copies across all books.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Quantity of `book`, if it is in the cart.
    pub fn quantity_of(&self, book: BookId) -> Option<u64> {
        self.items
            .iter()
            .find(|item| item.book.id == book)
            .map(|item| item.quantity)
    }

    /// Entries removed from the session while building this view.
    pub fn pruned(&self) -> &[PrunedEntry] {
        &self.pruned
    }
}
