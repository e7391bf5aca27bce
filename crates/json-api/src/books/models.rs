//! Book Models

use folio::{
    books::{Book, NewBook},
    prices::{PriceError, parse_amount},
};
use rusty_money::iso::Currency;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::money;

/// Book Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookResponse {
    /// Book identifier
    pub id: u64,

    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Optional blurb
    pub description: Option<String>,

    /// Unit price as a decimal string, e.g. "9.99"
    pub price: String,

    /// ISO currency code of the price
    pub currency: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            id: book.id.get(),
            price: money::amount(&book.price),
            currency: money::currency_code(&book.price),
            title: book.title,
            author: book.author,
            description: book.description,
        }
    }
}

/// Create or replace a book.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookRequest {
    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Optional blurb
    #[serde(default)]
    pub description: Option<String>,

    /// Unit price as a decimal string in the store currency
    pub price: String,
}

impl BookRequest {
    pub(crate) fn into_new_book(self, currency: &'static Currency) -> Result<NewBook, PriceError> {
        Ok(NewBook {
            price: parse_amount(&self.price, currency)?,
            title: self.title,
            author: self.author,
            description: self.description,
        })
    }
}
