//! Book Errors

use tracing::error;

use bookstore_app::domain::books::BooksServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: BooksServiceError) -> ApiError {
    match error {
        BooksServiceError::NotFound { .. } => ApiError::not_found(error.to_string()),
        BooksServiceError::InvalidArgument { .. } => ApiError::bad_request(error.to_string()),
        BooksServiceError::Sql(source) => {
            error!("books storage failure: {source}");

            ApiError::internal()
        }
    }
}
