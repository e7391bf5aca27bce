//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the session's cart, priced against the current catalog. Entries
/// for books that no longer exist are removed and listed under `removed`.
#[endpoint(
    tags("cart"),
    summary = "View Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart contents"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Catalog unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let handle = depot.session_or_500()?;

    let mut entry = handle.lock().await;

    let view = state
        .carts
        .view(&mut entry.session, state.catalog.as_ref())
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}
