//! Books In Category Handler

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
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<Vec<BookResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = req.text_param("category")?;

    let books = state
        .app
        .books
        .list_books_by_category(&category)
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
    async fn test_category_name_is_percent_decoded() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books_by_category()
            .once()
            .withf(|category| category == "Science Fiction")
            .return_once(|_| Ok(vec![make_book(1, "Dune", 450)]));

        let mut res = TestClient::get("http://example.com/categories/Science%20Fiction")
            .send(&books_service(
                books,
                Router::with_path("categories/{category}").get(handler),
            ))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["count"], 1);

        Ok(())
    }
}
