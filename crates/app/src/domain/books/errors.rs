//! Books service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::Entity;

#[derive(Debug, Error)]
pub enum BooksServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: String },

    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl BooksServiceError {
    pub(crate) fn book_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: Entity::Book,
            id: id.to_string(),
        }
    }
}

impl From<Error> for BooksServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidArgument {
                field: "id",
                reason: "book is referenced by existing orders".to_string(),
            },
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::InvalidArgument {
                    field: "book",
                    reason: "violates catalog constraints".to_string(),
                }
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
