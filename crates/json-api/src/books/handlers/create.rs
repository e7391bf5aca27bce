//! Create Book Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    books::{BookResponse, errors::into_status_error, models::BookRequest},
    extensions::*,
    state::State,
};

/// Create Book Handler
#[endpoint(
    tags("books"),
    summary = "Create Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff access required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let staff = depot.staff_or_403()?;

    let new_book = json
        .into_inner()
        .into_new_book(state.carts.currency())
        .or_400("Invalid price")?;

    let book = state.catalog.create(new_book).map_err(into_status_error)?;

    info!(book = %book.id, staff = %staff.username, "book created");

    res.add_header(LOCATION, format!("/books/{}", book.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(book.into()))
}
