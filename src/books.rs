//! Books

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prices::MAX_PRICE_MINOR;

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum author length, in characters.
pub const MAX_AUTHOR_LEN: usize = 100;

/// Book identifier.
///
/// Cart mappings key books by the decimal string form of this identifier.
/// [`BookId::from_str`] only accepts the canonical rendering produced by
/// [`Display`]; carts read back any integer key and rewrite it in that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    /// Creates a new book identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A string that is not the canonical form of a [`BookId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a book identifier")]
pub struct InvalidBookId(pub String);

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map_err(|_err| InvalidBookId(s.to_string()))?;

        // Rejects "+7", "007" and friends, which would alias "7".
        if id.to_string() != s {
            return Err(InvalidBookId(s.to_string()));
        }

        Ok(Self(id))
    }
}

/// Book
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Book identifier
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Optional blurb
    pub description: Option<String>,

    /// Unit price
    pub price: Money<'static, Currency>,
}

/// New book data, before an identifier has been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Optional blurb
    pub description: Option<String>,

    /// Unit price
    pub price: Money<'static, Currency>,
}

/// Full replacement of a book's editable fields.
pub type BookUpdate = NewBook;

/// Reasons book data is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookDataError {
    /// Title is empty.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Title is longer than [`MAX_TITLE_LEN`].
    #[error("title must be at most {MAX_TITLE_LEN} characters")]
    TitleTooLong,

    /// Author is empty.
    #[error("author must not be empty")]
    EmptyAuthor,

    /// Author is longer than [`MAX_AUTHOR_LEN`].
    #[error("author must be at most {MAX_AUTHOR_LEN} characters")]
    AuthorTooLong,

    /// Price is negative.
    #[error("price must not be negative")]
    NegativePrice,

    /// Price exceeds the catalog maximum.
    #[error("price exceeds the maximum of {MAX_PRICE_MINOR} minor units")]
    PriceTooHigh,
}

impl NewBook {
    /// Check the field limits a catalog enforces.
    ///
    /// # Errors
    ///
    /// Returns the first [`BookDataError`] found.
    pub fn validate(&self) -> Result<(), BookDataError> {
        if self.title.trim().is_empty() {
            return Err(BookDataError::EmptyTitle);
        }

        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(BookDataError::TitleTooLong);
        }

        if self.author.trim().is_empty() {
            return Err(BookDataError::EmptyAuthor);
        }

        if self.author.chars().count() > MAX_AUTHOR_LEN {
            return Err(BookDataError::AuthorTooLong);
        }

        let minor = self.price.to_minor_units();

        if minor < 0 {
            return Err(BookDataError::NegativePrice);
        }

        if minor > MAX_PRICE_MINOR {
            return Err(BookDataError::PriceTooHigh);
        }

        Ok(())
    }

    /// Attach an identifier, producing a catalog record.
    #[must_use]
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            price: self.price,
        }
    }
}
