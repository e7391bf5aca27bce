//! Catalog
//!
//! The catalog store holds the authoritative book records. The cart only ever
//! needs [`Catalog::lookup_many`]; the rest backs browsing and staff
//! management.

use std::collections::BTreeSet;

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::books::{Book, BookDataError, BookId, BookUpdate, NewBook};

mod memory;

pub use memory::InMemoryCatalog;

/// The backing store could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("catalog store unavailable: {0}")]
pub struct StoreError(pub String);

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book with the given identifier.
    #[error("book not found")]
    NotFound,

    /// Book data failed validation.
    #[error("invalid book data: {0}")]
    InvalidData(#[from] BookDataError),

    /// Book price is in a different currency from the catalog.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Catalog currency code
        expected: &'static str,
        /// Offending currency code
        found: &'static str,
    },

    /// A book with this identifier already exists.
    #[error("book {0} already exists")]
    AlreadyExists(BookId),

    /// The store itself failed.
    #[error(transparent)]
    Unavailable(#[from] StoreError),
}

/// Catalog store contract.
#[automock]
pub trait Catalog: Send + Sync {
    /// Resolve the subset of `ids` that exist. Missing ids are simply absent
    /// from the result.
    fn lookup_many(&self, ids: &BTreeSet<BookId>) -> Result<FxHashMap<BookId, Book>, StoreError>;

    /// All books, ascending by id.
    fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// A single book.
    fn get(&self, id: BookId) -> Result<Book, CatalogError>;

    /// Adds a book under the next free identifier.
    fn create(&self, book: NewBook) -> Result<Book, CatalogError>;

    /// Replaces a book's editable fields.
    fn update(&self, id: BookId, update: BookUpdate) -> Result<Book, CatalogError>;

    /// Removes a book. Carts referencing it are pruned on their next read.
    fn delete(&self, id: BookId) -> Result<(), CatalogError>;
}
