//! Folio prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    books::{Book, BookDataError, BookId, BookUpdate, InvalidBookId, NewBook},
    cart::{
        CART_SESSION_KEY, CartError, CartManager, CartView, LineItem, MalformedEntry, PruneReason,
        PrunedEntry,
    },
    catalog::{Catalog, CatalogError, InMemoryCatalog, StoreError},
    fixtures::{Fixture, FixtureError},
    identity::{Identity, UserDirectory},
    prices::{PriceError, currency_from_code, parse_amount, parse_price, to_decimal},
    session::{MemorySession, Session},
};
