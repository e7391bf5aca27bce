//! Update Book Handler

use std::sync::Arc;

use folio::books::BookId;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;

use crate::{
    books::{BookResponse, errors::into_status_error, models::BookRequest},
    extensions::*,
    state::State,
};

/// Update Book Handler
///
/// Replaces every editable field of a book. Carts holding the book see the
/// new price on their next read.
#[endpoint(
    tags("books"),
    summary = "Update Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff access required"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<u64>,
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let staff = depot.staff_or_403()?;

    let update = json
        .into_inner()
        .into_new_book(state.carts.currency())
        .or_400("Invalid price")?;

    let book = state
        .catalog
        .update(BookId::new(book.into_inner()), update)
        .map_err(into_status_error)?;

    info!(book = %book.id, staff = %staff.username, "book updated");

    Ok(Json(book.into()))
}
