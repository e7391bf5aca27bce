//! Cart Errors

use folio::cart::CartError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CartError) -> StatusError {
    match error {
        CartError::NotFound(_) => StatusError::not_found().brief("Book not found"),
        CartError::QuantityOverflow(_) => {
            StatusError::conflict().brief("Quantity limit reached for this book")
        }
        CartError::TotalOverflow => {
            StatusError::unprocessable_entity().brief("Cart total is too large")
        }
        CartError::Money(source) => {
            error!("failed to total cart: {source}");

            StatusError::internal_server_error()
        }
        CartError::StoreUnavailable(source) => {
            error!("catalog store failed: {source}");

            StatusError::service_unavailable()
        }
    }
}
