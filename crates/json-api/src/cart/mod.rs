//! Cart
//!
//! Every route here works on the cart of the caller's session.

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
