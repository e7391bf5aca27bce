//! Cart Models

use folio::cart::{CartView, LineItem};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::{books::BookResponse, money};

/// Cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineItemResponse {
    /// The book, as currently in the catalog
    pub book: BookResponse,

    /// Number of copies
    pub quantity: u64,

    /// Unit price times quantity, as a decimal string
    pub line_total: String,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        LineItemResponse {
            line_total: money::amount(&item.line_total),
            quantity: item.quantity,
            book: item.book.into(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines, ascending by book id
    pub items: Vec<LineItemResponse>,

    /// Copies across all lines
    pub item_count: u64,

    /// Sum of all line totals, as a decimal string
    pub total: String,

    /// ISO currency code of all amounts
    pub currency: String,

    /// Raw keys of entries dropped from the cart while reading it
    pub removed: Vec<String>,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        let total = view.total();
        let item_count = view.item_count();
        let removed = view.pruned().iter().map(|entry| entry.key.clone()).collect();

        CartResponse {
            items: view.into_items().into_iter().map(Into::into).collect(),
            item_count,
            total: money::amount(&total),
            currency: money::currency_code(&total),
            removed,
        }
    }
}

/// Add Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemResponse {
    /// Book added
    pub book: u64,

    /// Quantity of the book now in the cart
    pub quantity: u64,
}

/// Order receipt
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    /// Customer who checked out
    pub username: String,

    /// What was bought; empty when the cart was
    pub items: Vec<LineItemResponse>,

    /// Copies across all lines
    pub item_count: u64,

    /// Amount due, as a decimal string
    pub total: String,

    /// ISO currency code of all amounts
    pub currency: String,
}

impl ReceiptResponse {
    pub(crate) fn new(username: String, view: CartView) -> Self {
        let CartResponse {
            items,
            item_count,
            total,
            currency,
            ..
        } = CartResponse::from(view);

        ReceiptResponse {
            username,
            items,
            item_count,
            total,
            currency,
        }
    }
}
