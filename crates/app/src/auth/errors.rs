//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    /// Token issuance referenced an account that does not exist.
    #[error("user not found")]
    UserNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::UserNotFound,
            Some(_) | None => Self::Sql(error),
        }
    }
}
