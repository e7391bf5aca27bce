//! Cart entries as they sit in the session.
//!
//! The session medium is loosely typed, so everything read from it is checked
//! here before it reaches cart arithmetic.

use std::collections::{BTreeMap, btree_map::Entry};

use serde_json::{Map, Value};
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use tracing::warn;

use crate::{books::BookId, cart::CART_SESSION_KEY, session::Session};

/// Raw cart mapping, exactly as stored.
pub(super) type RawCart = Map<String, Value>;

/// A cart entry that could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedEntry {
    /// Key does not parse as an unsigned integer.
    #[error("key is not a book identifier")]
    Key,

    /// Quantity is zero or negative.
    #[error("quantity {0} is not positive")]
    NonPositive(i64),

    /// Quantity is a number, but not an integer.
    #[error("quantity {0} is not an integer")]
    NonIntegral(f64),

    /// Quantity is not a number at all.
    #[error("quantity is not a number")]
    NotANumber,
}

/// Why an entry was removed from the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum PruneReason {
    /// The book no longer exists in the catalog.
    StaleBook,

    /// The entry itself is unreadable.
    Malformed(MalformedEntry),

    /// The quantity, or the price at that quantity, does not fit in the
    /// cart's arithmetic.
    Overflow,
}

/// An entry removed from the cart during a read.
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedEntry {
    /// Raw session key of the entry
    pub key: String,

    /// Why it was removed
    pub reason: PruneReason,
}

/// Cart mapping as read from a session.
#[derive(Debug, Default)]
pub(super) struct StoredCart {
    /// Entries exactly as stored.
    pub(super) raw: RawCart,

    /// The stored value was present but was not a mapping.
    pub(super) corrupt: bool,
}

impl StoredCart {
    /// Read the cart mapping, treating absence as empty.
    pub(super) fn read<S: Session + ?Sized>(session: &S) -> Self {
        match session.get(CART_SESSION_KEY) {
            None | Some(Value::Null) => Self::default(),
            Some(Value::Object(raw)) => Self {
                raw: raw.clone(),
                corrupt: false,
            },
            Some(other) => {
                warn!(value = %other, "cart mapping is not an object, treating as empty");

                Self {
                    raw: RawCart::new(),
                    corrupt: true,
                }
            }
        }
    }
}

/// A readable entry, possibly stored under several keys.
#[derive(Debug)]
pub(super) struct Readable {
    /// Quantity summed over every key
    pub(super) quantity: u64,

    /// Raw keys that resolved to this book, e.g. `"7"` and `"07"`
    pub(super) keys: SmallVec<[String; 1]>,
}

/// Entries split into readable and unreadable.
#[derive(Debug, Default)]
pub(super) struct Classified {
    /// Readable entries, ascending by book id.
    pub(super) entries: BTreeMap<BookId, Readable>,

    /// Unreadable entries.
    pub(super) malformed: SmallVec<[PrunedEntry; 2]>,

    /// Some readable key is not in canonical form and needs rewriting.
    pub(super) aliased: bool,
}

pub(super) fn classify(raw: &RawCart) -> Classified {
    let mut classified = Classified::default();

    for (key, value) in raw {
        let (book, quantity) = match parse_entry(key, value) {
            Ok(parsed) => parsed,
            Err(malformed) => {
                classified.malformed.push(PrunedEntry {
                    key: key.clone(),
                    reason: PruneReason::Malformed(malformed),
                });

                continue;
            }
        };

        if *key != book.to_string() {
            classified.aliased = true;
        }

        match classified.entries.entry(book) {
            Entry::Vacant(slot) => {
                slot.insert(Readable {
                    quantity,
                    keys: smallvec![key.clone()],
                });
            }
            Entry::Occupied(mut slot) => {
                let readable = slot.get_mut();

                match readable.quantity.checked_add(quantity) {
                    Some(merged) => {
                        readable.quantity = merged;
                        readable.keys.push(key.clone());
                    }
                    None => classified.malformed.push(PrunedEntry {
                        key: key.clone(),
                        reason: PruneReason::Overflow,
                    }),
                }
            }
        }
    }

    classified
}

/// Keys are resolved by integer value, so `"07"` and `"+7"` both name book 7.
pub(super) fn parse_entry(key: &str, value: &Value) -> Result<(BookId, u64), MalformedEntry> {
    let book = key
        .parse::<u64>()
        .map(BookId::new)
        .map_err(|_err| MalformedEntry::Key)?;

    Ok((book, parse_quantity(value)?))
}

pub(super) fn parse_quantity(value: &Value) -> Result<u64, MalformedEntry> {
    let Value::Number(number) = value else {
        return Err(MalformedEntry::NotANumber);
    };

    if let Some(quantity) = number.as_u64() {
        return if quantity == 0 {
            Err(MalformedEntry::NonPositive(0))
        } else {
            Ok(quantity)
        };
    }

    if let Some(negative) = number.as_i64() {
        return Err(MalformedEntry::NonPositive(negative));
    }

    Err(MalformedEntry::NonIntegral(number.as_f64().unwrap_or(f64::NAN)))
}
