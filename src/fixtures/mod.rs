//! Fixtures
//!
//! Seed data for a bookstore, read from a single YAML file:
//!
//! ```yaml
//! currency: USD
//! books:
//!   1:
//!     title: Dune
//!     author: Frank Herbert
//!     price: 9.99 USD
//! users:
//!   alice:
//!     token: alice-token
//!     staff: true
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    books::{Book, BookId},
    catalog::{CatalogError, InMemoryCatalog},
    identity::{Identity, UserDirectory},
    prices::{PriceError, currency_from_code, parse_price},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency
    #[error("Invalid price for book {book}: {source}")]
    Price {
        /// Book key in the fixture
        book: u64,
        /// Underlying parse error
        source: PriceError,
    },

    /// Unknown top-level currency
    #[error(transparent)]
    Currency(PriceError),

    /// Book rejected by the catalog
    #[error("Invalid book data: {0}")]
    Catalog(#[from] CatalogError),

    /// Currency mismatch between books
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No currency given and no books to infer it from
    #[error("No currency given and no books loaded; currency unknown")]
    NoCurrency,

    /// Two users share a token
    #[error("Duplicate user token for {0}")]
    DuplicateToken(String),
}

#[derive(Debug, Deserialize)]
struct BookstoreFixture {
    #[serde(default)]
    currency: Option<String>,

    #[serde(default)]
    books: BTreeMap<u64, BookFixture>,

    #[serde(default)]
    users: BTreeMap<String, UserFixture>,
}

#[derive(Debug, Deserialize)]
struct BookFixture {
    title: String,
    author: String,

    #[serde(default)]
    description: Option<String>,

    price: String,
}

#[derive(Debug, Deserialize)]
struct UserFixture {
    token: String,

    #[serde(default)]
    staff: bool,
}

/// A loaded bookstore: catalog, users and the currency both are priced in.
#[derive(Debug)]
pub struct Fixture {
    catalog: InMemoryCatalog,
    users: UserDirectory,
    currency: &'static Currency,
}

impl Fixture {
    /// Load a bookstore fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path.as_ref())?;

        Self::from_yaml(&contents)
    }

    /// Parse a bookstore fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid, books
    /// disagree on currency, or two users share a token.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: BookstoreFixture = serde_norway::from_str(contents)?;

        let mut currency = fixture
            .currency
            .as_deref()
            .map(currency_from_code)
            .transpose()
            .map_err(FixtureError::Currency)?;

        let mut books = Vec::with_capacity(fixture.books.len());

        for (key, book_fixture) in fixture.books {
            let price = parse_price(&book_fixture.price)
                .map_err(|source| FixtureError::Price { book: key, source })?;

            match currency {
                Some(existing) if existing != price.currency() => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        price.currency().iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(price.currency()),
            }

            books.push(Book {
                id: BookId::new(key),
                title: book_fixture.title,
                author: book_fixture.author,
                description: book_fixture.description,
                price,
            });
        }

        let currency = currency.ok_or(FixtureError::NoCurrency)?;
        let catalog = InMemoryCatalog::with_books(currency, books)?;

        let mut users = UserDirectory::new();

        for (username, user) in fixture.users {
            if users.authenticate(&user.token).is_some() {
                return Err(FixtureError::DuplicateToken(username));
            }

            users.insert(
                user.token,
                Identity {
                    username,
                    is_staff: user.staff,
                },
            );
        }

        Ok(Self {
            catalog,
            users,
            currency,
        })
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    /// The loaded users.
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Currency of the fixture set.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Split the fixture into its parts.
    pub fn into_parts(self) -> (InMemoryCatalog, UserDirectory, &'static Currency) {
        (self.catalog, self.users, self.currency)
    }
}
