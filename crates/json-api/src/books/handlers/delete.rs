//! Delete Book Handler

use std::sync::Arc;

use folio::books::BookId;
use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use crate::{books::errors::into_status_error, extensions::*, state::State};

/// Delete Book Handler
///
/// Carts still holding the book drop it on their next read.
#[endpoint(
    tags("books"),
    summary = "Delete Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff access required"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<u64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let staff = depot.staff_or_403()?;

    let book = BookId::new(book.into_inner());

    state.catalog.delete(book).map_err(into_status_error)?;

    info!(book = %book, staff = %staff.username, "book deleted");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use folio::catalog::{CatalogError, MockCatalog};
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{STAFF_TOKEN, bearer, catalog_service};

    use super::*;

    fn make_service(catalog: MockCatalog) -> Service {
        catalog_service(catalog, Router::with_path("books/{book}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_book_success() -> TestResult {
        let mut catalog = MockCatalog::new();

        catalog
            .expect_delete()
            .once()
            .withf(|id| *id == BookId::new(3))
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/books/3")
            .add_header(AUTHORIZATION, bearer(STAFF_TOKEN), true)
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_book_returns_404() -> TestResult {
        let mut catalog = MockCatalog::new();

        catalog
            .expect_delete()
            .once()
            .return_once(|_| Err(CatalogError::NotFound));

        let res = TestClient::delete("http://example.com/books/3")
            .add_header(AUTHORIZATION, bearer(STAFF_TOKEN), true)
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_anonymous_returns_401() -> TestResult {
        let mut catalog = MockCatalog::new();

        catalog.expect_delete().never();

        let res = TestClient::delete("http://example.com/books/3")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
