//! Book Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{books::BookResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksResponse {
    /// The catalog, ascending by id
    pub books: Vec<BookResponse>,
}

/// Book Index Handler
///
/// Returns every book in the catalog.
#[endpoint(tags("books"), summary = "List Books")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BooksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let books = state.catalog.list().or_500("failed to fetch books")?;

    Ok(Json(BooksResponse {
        books: books.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use folio::catalog::{MockCatalog, StoreError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{catalog_service, make_book};

    use super::*;

    fn make_service(catalog: MockCatalog) -> Service {
        catalog_service(catalog, Router::with_path("books").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_200() -> TestResult {
        let mut catalog = MockCatalog::new();

        catalog
            .expect_list()
            .once()
            .return_once(|| Ok(vec![make_book(1, 999), make_book(2, 450)]));

        let mut res = TestClient::get("http://example.com/books")
            .send(&make_service(catalog))
            .await;

        let body: BooksResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.books.len(), 2);
        assert_eq!(body.books.first().map(|book| book.price.as_str()), Some("9.99"));
        assert_eq!(body.books.get(1).map(|book| book.price.as_str()), Some("4.50"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_store_failure_returns_500() -> TestResult {
        let mut catalog = MockCatalog::new();

        catalog
            .expect_list()
            .once()
            .return_once(|| Err(StoreError("down".to_string())));

        let res = TestClient::get("http://example.com/books")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
