//! List Categories Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    books::errors::into_api_error,
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// List Categories Handler
///
/// Distinct category names in use, sorted.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<String>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .books
        .list_categories()
        .await
        .map_err(into_api_error)?;

    Ok(Reply::list(categories))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use bookstore_app::domain::books::MockBooksService;

    use crate::test_helpers::books_service;

    use super::*;

    #[tokio::test]
    async fn test_categories_are_listed() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec!["Education".to_string(), "Technology".to_string()]));

        let mut res = TestClient::get("http://example.com/categories")
            .send(&books_service(
                books,
                Router::with_path("categories").get(handler),
            ))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body,
            json!({ "success": true, "count": 2, "data": ["Education", "Technology"] })
        );

        Ok(())
    }
}
