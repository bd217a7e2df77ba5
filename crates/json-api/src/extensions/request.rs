//! Request parsing helpers that fail with 400 envelopes.

use salvo::prelude::Request;
use serde::de::DeserializeOwned;

use bookstore_app::ids::TypedId;

use crate::envelope::ApiError;

pub(crate) trait RequestExt {
    /// Numeric surrogate key from the path segment `name`.
    fn id_param<T>(&self, name: &str) -> Result<TypedId<T>, ApiError>;

    /// Raw path segment `name`, percent-decoded.
    fn text_param(&self, name: &str) -> Result<String, ApiError>;

    async fn json_body<T: DeserializeOwned>(&mut self) -> Result<T, ApiError>;
}

impl RequestExt for Request {
    fn id_param<T>(&self, name: &str) -> Result<TypedId<T>, ApiError> {
        self.param::<i64>(name)
            .map(TypedId::from_i64)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid {name} provided")))
    }

    fn text_param(&self, name: &str) -> Result<String, ApiError> {
        self.param::<String>(name)
            .ok_or_else(|| ApiError::bad_request(format!("{name} parameter is required")))
    }

    async fn json_body<T: DeserializeOwned>(&mut self) -> Result<T, ApiError> {
        self.parse_json::<T>()
            .await
            .map_err(|error| ApiError::bad_request(format!("Invalid request body: {error}")))
    }
}
