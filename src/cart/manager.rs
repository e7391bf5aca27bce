//! Cart Manager

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    books::BookId,
    cart::{
        CART_SESSION_KEY, CartError, CartView, LineItem, PruneReason, PrunedEntry,
        entries::{self, RawCart, StoredCart},
    },
    catalog::Catalog,
    session::Session,
};

/// Reads and writes carts held in sessions.
///
/// The manager keeps no state of its own beyond the currency used to price an
/// empty cart. Callers sharing a session across threads must serialise calls
/// for that session.
#[derive(Debug, Clone, Copy)]
pub struct CartManager {
    currency: &'static Currency,
}

impl CartManager {
    /// Create a manager pricing carts in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// The currency carts are priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Add one copy of `book` to the cart, returning the new quantity.
    ///
    /// Other entries are written back untouched, even unreadable ones; only
    /// [`CartManager::view`] prunes. An unreadable quantity stored for `book`
    /// itself is replaced by 1.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotFound`]: the book is not in the catalog. The session is not written.
    /// - [`CartError::QuantityOverflow`]: the quantity is already `u64::MAX`.
    /// - [`CartError::StoreUnavailable`]: the catalog lookup failed.
    pub fn add_item<S, C>(&self, session: &mut S, book: BookId, catalog: &C) -> Result<u64, CartError>
    where
        S: Session + ?Sized,
        C: Catalog + ?Sized,
    {
        let found = catalog.lookup_many(&BTreeSet::from([book]))?;

        if !found.contains_key(&book) {
            debug!(book = %book, "rejected add of unknown book");

            return Err(CartError::NotFound(book));
        }

        let StoredCart { mut raw, .. } = StoredCart::read(session);
        let key = book.to_string();

        let quantity = match raw.get(&key).map(entries::parse_quantity) {
            Some(Ok(current)) => current
                .checked_add(1)
                .ok_or(CartError::QuantityOverflow(book))?,
            Some(Err(malformed)) => {
                warn!(book = %book, "replacing unreadable quantity: {malformed}");

                1
            }
            None => 1,
        };

        raw.insert(key, Value::from(quantity));

        session.set(CART_SESSION_KEY, Value::Object(raw));
        session.mark_modified();

        debug!(book = %book, quantity, "book added to cart");

        Ok(quantity)
    }

    /// Resolve the cart against the catalog.
    ///
    /// Unreadable entries, entries for books no longer in the catalog, and
    /// entries too large to price are removed from the session in a single
    /// write and reported through [`CartView::pruned`]. The same write stores
    /// non-canonical keys such as `"07"` under their canonical form. A cart
    /// with nothing to prune or rename is not written.
    ///
    /// # Errors
    ///
    /// - [`CartError::StoreUnavailable`]: the catalog lookup failed. The session is not written.
    /// - [`CartError::Money`]: the catalog priced a book in another currency.
    pub fn view<S, C>(&self, session: &mut S, catalog: &C) -> Result<CartView, CartError>
    where
        S: Session + ?Sized,
        C: Catalog + ?Sized,
    {
        let stored = StoredCart::read(session);

        if stored.raw.is_empty() && !stored.corrupt {
            return Ok(CartView::empty(self.currency));
        }

        let entries::Classified {
            entries: readable,
            mut malformed,
            aliased,
        } = entries::classify(&stored.raw);

        let ids: BTreeSet<BookId> = readable.keys().copied().collect();

        let mut books = if ids.is_empty() {
            FxHashMap::default()
        } else {
            catalog.lookup_many(&ids)?
        };

        let mut items = Vec::with_capacity(readable.len());
        let mut running_total = 0_i64;

        for (id, entry) in readable {
            let Some(book) = books.remove(&id) else {
                Self::drop_keys(&mut malformed, entry.keys, &PruneReason::StaleBook);

                continue;
            };

            let priced = LineItem::new(book, entry.quantity).ok().and_then(|item| {
                running_total
                    .checked_add(item.line_total.to_minor_units())
                    .map(|total| (item, total))
            });

            match priced {
                Some((item, total)) => {
                    running_total = total;
                    items.push(item);
                }
                None => Self::drop_keys(&mut malformed, entry.keys, &PruneReason::Overflow),
            }
        }

        if stored.corrupt || aliased || !malformed.is_empty() {
            Self::rewrite(session, &items, &malformed);
        }

        CartView::with_items(items, self.currency, malformed)
    }

    /// Empty the cart. Always succeeds, whatever the cart held.
    pub fn checkout<S: Session + ?Sized>(&self, session: &mut S) {
        session.set(CART_SESSION_KEY, Value::Object(RawCart::new()));
        session.mark_modified();

        debug!("cart cleared");
    }

    fn drop_keys(
        pruned: &mut SmallVec<[PrunedEntry; 2]>,
        keys: SmallVec<[String; 1]>,
        reason: &PruneReason,
    ) {
        pruned.extend(keys.into_iter().map(|key| PrunedEntry {
            key,
            reason: reason.clone(),
        }));
    }

    /// Store exactly the priced items, under canonical keys.
    fn rewrite<S: Session + ?Sized>(session: &mut S, items: &[LineItem], pruned: &[PrunedEntry]) {
        for entry in pruned {
            warn!(key = %entry.key, reason = ?entry.reason, "pruning cart entry");
        }

        let raw: RawCart = items
            .iter()
            .map(|item| (item.book.id.to_string(), Value::from(item.quantity)))
            .collect();

        session.set(CART_SESSION_KEY, Value::Object(raw));
        session.mark_modified();
    }
}
