//! Cart
//!
//! A session-backed shopping cart: a mapping from book id (as a string key) to
//! quantity, stored under [`CART_SESSION_KEY`] and validated against the
//! catalog every time it is read.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{books::BookId, catalog::StoreError};

mod entries;
mod manager;
mod view;

pub use entries::{MalformedEntry, PruneReason, PrunedEntry};
pub use manager::CartManager;
pub use view::{CartView, LineItem};

/// Session key the cart mapping lives under.
pub const CART_SESSION_KEY: &str = "cart";

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The book does not exist in the catalog.
    #[error("book {0} not found")]
    NotFound(BookId),

    /// The quantity for the book is already at its maximum.
    #[error("quantity for book {0} cannot be increased")]
    QuantityOverflow(BookId),

    /// A line or grand total does not fit in minor units.
    #[error("cart total is not representable")]
    TotalOverflow,

    /// Money arithmetic failed, e.g. mixed currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The catalog store failed.
    #[error("store unavailable")]
    StoreUnavailable(#[from] StoreError),
}
