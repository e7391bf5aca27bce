//! Book Errors

use folio::catalog::CatalogError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CatalogError) -> StatusError {
    match error {
        CatalogError::NotFound => StatusError::not_found().brief("Book not found"),
        CatalogError::AlreadyExists(_) => StatusError::conflict().brief("Book already exists"),
        CatalogError::InvalidData(source) => {
            StatusError::bad_request().brief(format!("Invalid book payload: {source}"))
        }
        CatalogError::CurrencyMismatch { expected, found } => StatusError::bad_request()
            .brief(format!("Book must be priced in {expected}, not {found}")),
        CatalogError::Unavailable(source) => {
            error!("catalog store failed: {source}");

            StatusError::service_unavailable()
        }
    }
}
