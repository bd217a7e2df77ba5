//! Order Errors

use tracing::error;

use bookstore_app::domain::orders::OrdersServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::NotFound { .. } => ApiError::not_found(error.to_string()),
        OrdersServiceError::InvalidArgument { .. } => ApiError::bad_request(error.to_string()),
        OrdersServiceError::Sql(source) => {
            error!("orders storage failure: {source}");

            ApiError::internal()
        }
    }
}
