//! Folio
//!
//! Folio is a small bookstore engine: a book catalog, session-held shopping
//! carts priced with exact money arithmetic, and the identity and fixture
//! plumbing needed to serve them.

pub mod books;
pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod identity;
pub mod prelude;
pub mod prices;
pub mod session;
