//! Test helpers.

use std::{sync::Arc, time::Duration};

use folio::{
    books::{Book, BookId},
    cart::CartManager,
    catalog::MockCatalog,
    identity::{Identity, UserDirectory},
};
use rusty_money::{Money, iso::USD};
use salvo::{affix_state::inject, prelude::*};

use crate::{auth, sessions, state::State};

pub(crate) const STAFF_TOKEN: &str = "staff-token";
pub(crate) const READER_TOKEN: &str = "reader-token";

pub(crate) fn users() -> UserDirectory {
    let mut users = UserDirectory::new();

    users.insert(
        STAFF_TOKEN,
        Identity {
            username: "admin".to_string(),
            is_staff: true,
        },
    );

    users.insert(
        READER_TOKEN,
        Identity {
            username: "reader".to_string(),
            is_staff: false,
        },
    );

    users
}

pub(crate) fn make_book(id: u64, minor: i64) -> Book {
    Book {
        id: BookId::new(id),
        title: format!("Book {id}"),
        author: "Anon".to_string(),
        description: None,
        price: Money::from_minor(minor, USD),
    }
}

pub(crate) fn state_with_users(catalog: MockCatalog, users: UserDirectory) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(catalog),
        users,
        CartManager::new(USD),
        Duration::from_secs(60),
    ))
}

pub(crate) fn state_with_catalog(catalog: MockCatalog) -> Arc<State> {
    state_with_users(catalog, users())
}

/// A service running `route` behind the real auth and session middleware.
pub(crate) fn state_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(auth::middleware::handler)
            .hoop(sessions::middleware::handler)
            .push(route),
    )
}

pub(crate) fn catalog_service(catalog: MockCatalog, route: Router) -> Service {
    state_service(state_with_catalog(catalog), route)
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// A catalog mock answering lookups from `books`, any number of times.
pub(crate) fn lookup_catalog(books: Vec<Book>) -> MockCatalog {
    let mut catalog = MockCatalog::new();

    catalog.expect_lookup_many().returning(move |ids| {
        Ok(books
            .iter()
            .filter(|book| ids.contains(&book.id))
            .map(|book| (book.id, book.clone()))
            .collect())
    });

    catalog
}

pub(crate) fn session_id(res: &Response) -> Option<String> {
    res.headers()
        .get(sessions::SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}
