//! Update Book Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    books::{
        errors::into_api_error,
        models::{BookResponse, UpdateBookRequest},
    },
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Update Book Handler
///
/// Partial update; fields missing from the body are left as stored.
#[handler]
#[tracing::instrument(
    name = "books.update",
    skip(req, depot),
    fields(book_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<BookResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let book = req.id_param("id")?;
    let request: UpdateBookRequest = req.json_body().await?;

    tracing::Span::current().record("book_id", tracing::field::display(book));

    let book = state
        .app
        .books
        .update_book(book, request.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(book_id = %book.id, price = book.price, "updated book");

    Ok(Reply::ok(book.into()).message("Book updated successfully"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use bookstore_app::domain::{
        Entity,
        books::{BooksServiceError, MockBooksService, models::BookUpdate, records::BookId},
    };

    use crate::test_helpers::{books_service, make_book};

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        books_service(books, Router::with_path("books/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_forwards_only_present_fields() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_update_book()
            .once()
            .withf(|id, update| {
                *id == BookId::from_i64(4)
                    && *update
                        == BookUpdate {
                            price: Some(700),
                            featured: Some(true),
                            ..BookUpdate::default()
                        }
            })
            .return_once(|_, _| Ok(make_book(4, "Dune", 700)));

        let mut res = TestClient::put("http://example.com/books/4")
            .json(&json!({ "price": 700, "featured": true }))
            .send(&make_service(books))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["data"]["price"], 700);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_book_returns_404() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_update_book().once().return_once(|_, _| {
            Err(BooksServiceError::NotFound {
                entity: Entity::Book,
                id: "4".to_string(),
            })
        });

        let res = TestClient::put("http://example.com/books/4")
            .json(&json!({ "title": "Children of Dune" }))
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_malformed_json_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_update_book().never();

        let res = TestClient::put("http://example.com/books/4")
            .raw_json("{\"price\": ")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
