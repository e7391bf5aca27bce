//! Cart behaviour against a real in-memory catalog.

use rusty_money::{Money, iso::USD};
use serde_json::json;
use testresult::TestResult;

use folio::prelude::*;

fn book(id: u64, title: &str, price: &str) -> Result<Book, PriceError> {
    Ok(Book {
        id: BookId::new(id),
        title: title.to_string(),
        author: "Anon".to_string(),
        description: None,
        price: parse_price(price)?,
    })
}

fn catalog(books: impl IntoIterator<Item = Book>) -> Result<InMemoryCatalog, CatalogError> {
    InMemoryCatalog::with_books(USD, books)
}

#[test]
fn repeated_adds_accumulate_quantity() -> TestResult {
    let catalog = catalog([book(3, "Dune", "9.99 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    for expected in 1..=5 {
        assert_eq!(
            manager.add_item(&mut session, BookId::new(3), &catalog)?,
            expected
        );
    }

    let view = manager.view(&mut session, &catalog)?;

    assert_eq!(view.quantity_of(BookId::new(3)), Some(5));
    assert_eq!(view.len(), 1);

    Ok(())
}

#[test]
fn adds_never_touch_other_entries() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?, book(2, "Emma", "4.00 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    manager.add_item(&mut session, BookId::new(1), &catalog)?;
    manager.add_item(&mut session, BookId::new(1), &catalog)?;
    manager.add_item(&mut session, BookId::new(2), &catalog)?;

    assert_eq!(
        session.get(CART_SESSION_KEY),
        Some(&json!({ "1": 2, "2": 1 }))
    );

    Ok(())
}

#[test]
fn unknown_book_is_rejected_without_touching_session() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    manager.add_item(&mut session, BookId::new(1), &catalog)?;
    session.take_modified();

    let before = session.get(CART_SESSION_KEY).cloned();

    let result = manager.add_item(&mut session, BookId::new(404), &catalog);

    assert!(matches!(result, Err(CartError::NotFound(id)) if id == BookId::new(404)));
    assert_eq!(session.get(CART_SESSION_KEY).cloned(), before);
    assert!(!session.is_modified());

    Ok(())
}

#[test]
fn unknown_book_on_fresh_session_leaves_cart_absent() -> TestResult {
    let catalog = InMemoryCatalog::new(USD);
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    let result = manager.add_item(&mut session, BookId::new(1), &catalog);

    assert!(matches!(result, Err(CartError::NotFound(_))));
    assert!(session.get(CART_SESSION_KEY).is_none());

    Ok(())
}

#[test]
fn checkout_is_idempotent() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?])?;
    let manager = CartManager::new(USD);
    let mut empty = MemorySession::new();
    let mut full = MemorySession::new();

    manager.checkout(&mut empty);

    assert!(manager.view(&mut empty, &catalog)?.is_empty());

    manager.add_item(&mut full, BookId::new(1), &catalog)?;
    manager.checkout(&mut full);

    let once = full.get(CART_SESSION_KEY).cloned();

    manager.checkout(&mut full);

    assert_eq!(full.get(CART_SESSION_KEY).cloned(), once);
    assert!(manager.view(&mut full, &catalog)?.is_empty());

    Ok(())
}

#[test]
fn deleted_book_is_pruned_on_next_view() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?, book(7, "Emma", "5.00 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    manager.add_item(&mut session, BookId::new(1), &catalog)?;
    manager.add_item(&mut session, BookId::new(7), &catalog)?;
    manager.add_item(&mut session, BookId::new(7), &catalog)?;

    catalog.delete(BookId::new(7))?;

    // Deletion alone does not touch the cart.
    assert_eq!(
        session.get(CART_SESSION_KEY),
        Some(&json!({ "1": 1, "7": 2 }))
    );

    let view = manager.view(&mut session, &catalog)?;

    assert_eq!(view.quantity_of(BookId::new(7)), None);
    assert_eq!(view.total(), Money::from_minor(999, USD));
    assert_eq!(
        view.pruned(),
        [PrunedEntry {
            key: "7".to_string(),
            reason: PruneReason::StaleBook,
        }]
    );
    assert_eq!(session.get(CART_SESSION_KEY), Some(&json!({ "1": 1 })));

    Ok(())
}

#[test]
fn totals_are_exact() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?, book(2, "Emma", "14.50 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    session.set(CART_SESSION_KEY, json!({ "1": 2, "2": 1 }));

    let view = manager.view(&mut session, &catalog)?;

    assert_eq!(view.total(), Money::from_minor(3448, USD));
    assert_eq!(to_decimal(&view.total()).to_string(), "34.48");

    let lines: Vec<(BookId, u64, i64)> = view
        .items()
        .iter()
        .map(|item| (item.book.id, item.quantity, item.line_total.to_minor_units()))
        .collect();

    assert_eq!(
        lines,
        vec![(BookId::new(1), 2, 1998), (BookId::new(2), 1, 1450)]
    );

    Ok(())
}

#[test]
fn never_populated_cart_is_empty() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    let view = manager.view(&mut session, &catalog)?;

    assert!(view.is_empty());
    assert!(view.items().is_empty());
    assert_eq!(view.total(), Money::from_minor(0, USD));
    assert!(!session.is_modified());

    Ok(())
}

#[test]
fn fully_pruned_cart_is_empty() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    manager.add_item(&mut session, BookId::new(1), &catalog)?;
    catalog.delete(BookId::new(1))?;

    let view = manager.view(&mut session, &catalog)?;

    assert!(view.is_empty());
    assert!(view.items().is_empty());
    assert_eq!(session.get(CART_SESSION_KEY), Some(&json!({})));

    Ok(())
}

#[test]
fn line_items_come_back_in_id_order() -> TestResult {
    let catalog = catalog([
        book(10, "Ten", "1.00 USD")?,
        book(2, "Two", "1.00 USD")?,
        book(33, "Thirty-three", "1.00 USD")?,
    ])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    for id in [33, 2, 10] {
        manager.add_item(&mut session, BookId::new(id), &catalog)?;
    }

    let ids: Vec<u64> = manager
        .view(&mut session, &catalog)?
        .items()
        .iter()
        .map(|item| item.book.id.get())
        .collect();

    assert_eq!(ids, vec![2, 10, 33]);

    Ok(())
}

#[test]
fn oversized_quantity_does_not_block_the_cart() -> TestResult {
    let catalog = catalog([book(1, "Dune", "9.99 USD")?, book(2, "Emma", "5.00 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    session.set(
        CART_SESSION_KEY,
        json!({ "1": 10_000_000_000_000_000_u64, "2": 1, "x": 1 }),
    );
    catalog.delete(BookId::new(2))?;

    let view = manager.view(&mut session, &catalog)?;

    assert!(view.is_empty());

    let mut reasons: Vec<(&str, &PruneReason)> = view
        .pruned()
        .iter()
        .map(|entry| (entry.key.as_str(), &entry.reason))
        .collect();

    reasons.sort_by_key(|(key, _)| *key);

    assert_eq!(
        reasons,
        vec![
            ("1", &PruneReason::Overflow),
            ("2", &PruneReason::StaleBook),
            ("x", &PruneReason::Malformed(MalformedEntry::Key)),
        ]
    );
    assert_eq!(session.get(CART_SESSION_KEY), Some(&json!({})));
    assert!(session.is_modified());

    // The next read sees a clean cart.
    assert!(manager.view(&mut session, &catalog)?.pruned().is_empty());

    manager.checkout(&mut session);

    assert_eq!(session.get(CART_SESSION_KEY), Some(&json!({})));

    Ok(())
}

#[test]
fn zero_padded_keys_resolve_to_the_same_book() -> TestResult {
    let catalog = catalog([book(7, "Emma", "5.00 USD")?])?;
    let manager = CartManager::new(USD);
    let mut session = MemorySession::new();

    session.set(CART_SESSION_KEY, json!({ "07": 2 }));

    manager.add_item(&mut session, BookId::new(7), &catalog)?;

    let view = manager.view(&mut session, &catalog)?;

    assert_eq!(view.quantity_of(BookId::new(7)), Some(3));
    assert_eq!(view.total(), Money::from_minor(1500, USD));
    assert!(view.pruned().is_empty());
    assert_eq!(session.get(CART_SESSION_KEY), Some(&json!({ "7": 3 })));

    Ok(())
}
