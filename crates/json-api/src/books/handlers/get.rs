//! Get Book Handler

use std::sync::Arc;

use folio::books::BookId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    books::{BookResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Get Book Handler
///
/// Returns a book.
#[endpoint(
    tags("books"),
    summary = "Get Book",
    responses(
        (status_code = StatusCode::OK, description = "Book found"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<u64>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let book = state
        .catalog
        .get(BookId::new(book.into_inner()))
        .map_err(into_status_error)?;

    Ok(Json(book.into()))
}
