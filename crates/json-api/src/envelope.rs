//! JSON response envelope shared by every endpoint.

use salvo::{
    http::StatusCode,
    prelude::{Json, Response, Scribe},
};
use serde::Serialize;
use thiserror::Error;

/// `{ success, message?, count?, data?, error? }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of entries in `data` for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Successful response rendered inside an [`Envelope`].
#[derive(Debug)]
pub(crate) struct Reply<T> {
    status: StatusCode,
    message: Option<String>,
    count: Option<usize>,
    data: Option<T>,
}

impl<T> Reply<T> {
    pub(crate) fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    pub(crate) fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    pub(crate) fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Reply<Vec<T>> {
    /// A list response; `count` mirrors the number of entries.
    pub(crate) fn list(data: Vec<T>) -> Self {
        Self {
            count: Some(data.len()),
            ..Self::ok(data)
        }
    }
}

impl Reply<()> {
    /// A success carrying only a message.
    pub(crate) fn done(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

impl<T> Scribe for Reply<T>
where
    T: Serialize + Send,
{
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(Envelope {
            success: true,
            message: self.message,
            count: self.count,
            data: self.data,
            error: None,
        }));
    }
}

/// Failed response rendered as `{ success: false, message, error }`.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Never carries the underlying cause; log it before building this.
    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        let error = self
            .status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string();

        res.status_code(self.status);
        res.render(Json(Envelope::<()> {
            success: false,
            message: Some(self.message),
            count: None,
            data: None,
            error: Some(error),
        }));
    }
}
