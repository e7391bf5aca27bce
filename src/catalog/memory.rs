//! In-memory catalog store.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    books::{Book, BookId, BookUpdate, NewBook},
    catalog::{Catalog, CatalogError, StoreError},
};

#[derive(Debug)]
struct Shelf {
    books: BTreeMap<BookId, Book>,
    next_id: u64,
}

/// Catalog held in process memory.
///
/// All books share a single currency, fixed at construction.
#[derive(Debug)]
pub struct InMemoryCatalog {
    currency: &'static Currency,
    shelf: RwLock<Shelf>,
}

impl InMemoryCatalog {
    /// Create an empty catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            shelf: RwLock::new(Shelf {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a catalog pre-populated with `books`, keeping their identifiers.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a book fails validation, is priced in
    /// another currency, or repeats an identifier.
    pub fn with_books(
        currency: &'static Currency,
        books: impl IntoIterator<Item = Book>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self::new(currency);

        {
            let mut shelf = catalog.write()?;

            for book in books {
                let Book {
                    id,
                    title,
                    author,
                    description,
                    price,
                } = book;

                let data = NewBook {
                    title,
                    author,
                    description,
                    price,
                };

                catalog.check(&data)?;

                if shelf.books.contains_key(&id) {
                    return Err(CatalogError::AlreadyExists(id));
                }

                shelf.next_id = shelf.next_id.max(id.get().saturating_add(1));
                shelf.books.insert(id, data.into_book(id));
            }
        }

        Ok(catalog)
    }

    /// The catalog currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn check(&self, book: &NewBook) -> Result<(), CatalogError> {
        book.validate()?;

        let found = book.price.currency();

        if found != self.currency {
            return Err(CatalogError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                found: found.iso_alpha_code,
            });
        }

        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Shelf>, StoreError> {
        self.shelf
            .read()
            .map_err(|_poisoned| StoreError("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Shelf>, StoreError> {
        self.shelf
            .write()
            .map_err(|_poisoned| StoreError("catalog lock poisoned".to_string()))
    }
}

impl Catalog for InMemoryCatalog {
    fn lookup_many(&self, ids: &BTreeSet<BookId>) -> Result<FxHashMap<BookId, Book>, StoreError> {
        let shelf = self.read()?;

        Ok(ids
            .iter()
            .filter_map(|id| shelf.books.get(id).map(|book| (*id, book.clone())))
            .collect())
    }

    fn list(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.read()?.books.values().cloned().collect())
    }

    fn get(&self, id: BookId) -> Result<Book, CatalogError> {
        self.read()?
            .books
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    fn create(&self, book: NewBook) -> Result<Book, CatalogError> {
        self.check(&book)?;

        let mut shelf = self.write()?;

        let id = BookId::new(shelf.next_id);

        shelf.next_id = shelf.next_id.saturating_add(1);

        let book = book.into_book(id);

        shelf.books.insert(id, book.clone());

        debug!(book = %id, "book created");

        Ok(book)
    }

    fn update(&self, id: BookId, update: BookUpdate) -> Result<Book, CatalogError> {
        self.check(&update)?;

        let mut shelf = self.write()?;

        let slot = shelf.books.get_mut(&id).ok_or(CatalogError::NotFound)?;

        *slot = update.into_book(id);

        debug!(book = %id, "book updated");

        Ok(slot.clone())
    }

    fn delete(&self, id: BookId) -> Result<(), CatalogError> {
        let mut shelf = self.write()?;

        if shelf.books.remove(&id).is_none() {
            return Err(CatalogError::NotFound);
        }

        debug!(book = %id, "book deleted");

        Ok(())
    }
}
