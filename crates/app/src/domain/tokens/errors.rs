//! Tokens service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokensServiceError {
    #[error("token not found")]
    NotFound,

    #[error("permission not found")]
    PermissionNotFound,

    #[error("a token with this secret already exists")]
    Conflict,

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("admin tokens cannot hold permissions")]
    AdminToken,

    #[error("the last admin token cannot be deleted")]
    LastAdmin,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TokensServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
