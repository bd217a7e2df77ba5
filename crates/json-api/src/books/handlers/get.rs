//! Get Book Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    books::{errors::into_api_error, models::BookResponse},
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Get Book Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<BookResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let book = req.id_param("id")?;

    let book = state.app.books.get_book(book).await.map_err(into_api_error)?;

    Ok(Reply::ok(book.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use bookstore_app::domain::{
        Entity,
        books::{BooksServiceError, MockBooksService, records::BookId},
    };

    use crate::test_helpers::{books_service, make_book};

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        books_service(books, Router::with_path("books/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_get_book()
            .once()
            .withf(|id| *id == BookId::from_i64(7))
            .return_once(|_| Ok(make_book(7, "Dune", 450)));

        let mut res = TestClient::get("http://example.com/books/7")
            .send(&make_service(books))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["data"]["id"], 7);
        assert_eq!(body["data"]["price"], 450);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_book_returns_404() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_get_book().once().return_once(|_| {
            Err(BooksServiceError::NotFound {
                entity: Entity::Book,
                id: "7".to_string(),
            })
        });

        let mut res = TestClient::get("http://example.com/books/7")
            .send(&make_service(books))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body["message"], "book 7 not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_get_book().never();

        let res = TestClient::get("http://example.com/books/abc")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
