//! Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{
    cart::{errors::into_status_error, models::ReceiptResponse},
    extensions::*,
    state::State,
};

/// Checkout Handler
///
/// Prices the cart, empties it, and returns what was in it. Checking out an
/// empty cart succeeds with an empty receipt. The cart is emptied even when
/// the receipt cannot be priced.
#[endpoint(
    tags("cart"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order receipt"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Catalog unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.identity_or_401()?;
    let handle = depot.session_or_500()?;

    let mut entry = handle.lock().await;

    let view = state
        .carts
        .view(&mut entry.session, state.catalog.as_ref());

    state.carts.checkout(&mut entry.session);

    let view = view.map_err(into_status_error)?;

    info!(
        customer = %customer.username,
        lines = view.len(),
        total = %view.total(),
        "checked out"
    );

    Ok(Json(ReceiptResponse::new(customer.username.clone(), view)))
}
