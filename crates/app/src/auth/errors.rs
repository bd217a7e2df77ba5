//! Auth service errors.

use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Malformed, unknown, revoked, expired or mismatched tokens all land here.
    #[error("no active api token matches")]
    NotFound,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("token processing error")]
    Token(#[from] ApiTokenError),
}
