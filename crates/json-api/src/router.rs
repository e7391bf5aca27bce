//! App Router

use salvo::Router;

use crate::{auth, books, cart, sessions};

/// Storefront routes, behind auth and session middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .hoop(sessions::middleware::handler)
        .push(
            Router::with_path("books")
                .get(books::index::handler)
                .post(books::create::handler)
                .push(
                    Router::with_path("{book}")
                        .get(books::get::handler)
                        .put(books::update::handler)
                        .delete(books::delete::handler),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(cart::get::handler)
                .push(Router::with_path("items/{book}").post(cart::add_item::handler))
                .push(Router::with_path("checkout").post(cart::checkout::handler)),
        )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio::fixtures::{Fixture, FixtureError};
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::{sessions::SESSION_ID_HEADER, state::State, test_helpers::session_id};

    use super::*;

    const STORE: &str = "\
currency: USD
books:
  1:
    title: Dune
    author: Frank Herbert
    price: 9.99 USD
  2:
    title: Emma
    author: Jane Austen
    price: 14.50 USD
users:
  admin:
    token: admin-token
    staff: true
  reader:
    token: reader-token
";

    fn service() -> Result<Service, FixtureError> {
        let state = State::from_fixture(Fixture::from_yaml(STORE)?, Duration::from_secs(60));

        Ok(Service::new(Router::new().hoop(inject(state)).push(app_router())))
    }

    #[tokio::test]
    async fn shopping_then_deleting_then_checking_out() -> TestResult {
        let service = service()?;

        let added = TestClient::post("http://example.com/cart/items/1")
            .send(&service)
            .await;

        let session = session_id(&added).ok_or("missing session header")?;

        for book in [1, 2] {
            let res = TestClient::post(format!("http://example.com/cart/items/{book}"))
                .add_header(SESSION_ID_HEADER, session.as_str(), true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK));
        }

        let deleted = TestClient::delete("http://example.com/books/2")
            .add_header(AUTHORIZATION, "Bearer admin-token", true)
            .send(&service)
            .await;

        assert_eq!(deleted.status_code, Some(StatusCode::OK));

        let mut cart = TestClient::get("http://example.com/cart")
            .add_header(SESSION_ID_HEADER, session.as_str(), true)
            .send(&service)
            .await;

        let cart: Value = cart.take_json().await?;

        assert_eq!(cart.get("total"), Some(&json!("19.98")));
        assert_eq!(cart.get("removed"), Some(&json!(["2"])));

        let mut receipt = TestClient::post("http://example.com/cart/checkout")
            .add_header(SESSION_ID_HEADER, session.as_str(), true)
            .add_header(AUTHORIZATION, "Bearer reader-token", true)
            .send(&service)
            .await;

        let receipt: Value = receipt.take_json().await?;

        assert_eq!(receipt.get("username"), Some(&json!("reader")));
        assert_eq!(receipt.get("total"), Some(&json!("19.98")));

        let mut after = TestClient::get("http://example.com/cart")
            .add_header(SESSION_ID_HEADER, session.as_str(), true)
            .send(&service)
            .await;

        let after: Value = after.take_json().await?;

        assert_eq!(after.get("items"), Some(&json!([])));

        Ok(())
    }

    #[tokio::test]
    async fn catalog_is_public_but_management_is_staff_only() -> TestResult {
        let service = service()?;

        let listed = TestClient::get("http://example.com/books")
            .send(&service)
            .await;

        assert_eq!(listed.status_code, Some(StatusCode::OK));

        let created = TestClient::post("http://example.com/books")
            .add_header(AUTHORIZATION, "Bearer reader-token", true)
            .json(&json!({ "title": "X", "author": "Y", "price": "1.00" }))
            .send(&service)
            .await;

        assert_eq!(created.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
