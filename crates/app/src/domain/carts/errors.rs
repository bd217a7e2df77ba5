//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::Entity;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: String },

    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    pub(crate) fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => {
                Self::invalid("quantity", "violates cart constraints")
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
