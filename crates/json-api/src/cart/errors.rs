//! Cart Errors

use tracing::error;

use bookstore_app::domain::carts::CartsServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound { .. } => ApiError::not_found(error.to_string()),
        CartsServiceError::InvalidArgument { .. } => ApiError::bad_request(error.to_string()),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            ApiError::internal()
        }
    }
}
