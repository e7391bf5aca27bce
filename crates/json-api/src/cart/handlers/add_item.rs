//! Add Cart Item Handler

use std::sync::Arc;

use folio::books::BookId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    cart::{errors::into_status_error, models::AddItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Handler
///
/// Adds one copy of a book to the session's cart.
#[endpoint(
    tags("cart"),
    summary = "Add Book to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Book added"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Catalog unavailable"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<u64>,
    depot: &mut Depot,
) -> Result<Json<AddItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let handle = depot.session_or_500()?;
    let book = BookId::new(book.into_inner());

    let mut entry = handle.lock().await;

    let quantity = state
        .carts
        .add_item(&mut entry.session, book, state.catalog.as_ref())
        .map_err(into_status_error)?;

    Ok(Json(AddItemResponse {
        book: book.get(),
        quantity,
    }))
}
