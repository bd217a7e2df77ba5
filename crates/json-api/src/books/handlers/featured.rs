//! Featured Books Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    books::{
        errors::into_api_error,
        models::{BookResponse, book_list},
    },
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<BookResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let books = state
        .app
        .books
        .list_featured_books()
        .await
        .map_err(into_api_error)?;

    Ok(Reply::list(book_list(books)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use bookstore_app::domain::books::MockBooksService;

    use crate::test_helpers::{books_service, make_book};

    use super::*;

    #[tokio::test]
    async fn test_featured_returns_flagged_books() -> TestResult {
        let mut books = MockBooksService::new();
        let mut featured = make_book(3, "Emma", 300);

        featured.featured = true;

        books
            .expect_list_featured_books()
            .once()
            .return_once(move || Ok(vec![featured]));

        let mut res = TestClient::get("http://example.com/books/featured")
            .send(&books_service(
                books,
                Router::with_path("books/featured").get(handler),
            ))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["data"][0]["featured"], true);

        Ok(())
    }
}
