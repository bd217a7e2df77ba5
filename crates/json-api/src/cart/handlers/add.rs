//! Add Cart Item Handler

use std::sync::Arc;

use salvo::prelude::*;

use bookstore_app::domain::books::records::BookId;

use crate::{
    cart::{
        errors::into_api_error,
        handlers::session_param,
        models::{AddCartItemRequest, CartResponse},
    },
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Add Cart Item Handler
///
/// Adding a book already in the cart tops up its line at the original price.
#[handler]
#[tracing::instrument(
    name = "cart.add",
    skip(req, depot),
    fields(
        session_id = tracing::field::Empty,
        book_id = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = session_param(req)?;
    let request: AddCartItemRequest = req.json_body().await?;

    let span = tracing::Span::current();

    span.record("session_id", session.as_str());
    span.record("book_id", request.book_id);
    span.record("quantity", request.quantity);

    let cart = state
        .app
        .carts
        .add_item(&session, BookId::from_i64(request.book_id), request.quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Reply::ok(cart.into()).message("Item added to cart successfully"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use bookstore_app::domain::{
        Entity,
        carts::{CartsServiceError, MockCartsService},
    };

    use crate::{cart::handlers::tests::make_cart, test_helpers::carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/{session}/add").post(handler))
    }

    #[tokio::test]
    async fn test_add_defaults_quantity_to_one() -> TestResult {
        let cart = make_cart("s1", &[(10, 1, 300)])?;
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|session, book, quantity| {
                session.as_str() == "s1" && *book == BookId::from_i64(10) && *quantity == 1
            })
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/cart/s1/add")
            .json(&json!({ "bookId": 10 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 300);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_missing_book_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().once().return_once(|_, _, _| {
            Err(CartsServiceError::NotFound {
                entity: Entity::Book,
                id: "999".to_string(),
            })
        });

        let mut res = TestClient::post("http://example.com/cart/s1/add")
            .json(&json!({ "bookId": 999, "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body["message"], "book 999 not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_without_book_id_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/s1/add")
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
