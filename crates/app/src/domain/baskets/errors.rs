//! Baskets service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BasketsServiceError {
    #[error("no items given")]
    EmptyItems,

    #[error("item quantity must be positive")]
    InvalidQuantity,

    /// The basket already holds a line for this product offer; duplicates
    /// fail rather than merge.
    #[error("item already in basket")]
    DuplicateItem,

    #[error("product offer not found")]
    UnknownProductInfo,

    #[error("no basket-state order")]
    NoBasket,

    #[error("no matching items in basket")]
    NoMatchingItems,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BasketsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NoBasket;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateItem,
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownProductInfo,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(_) | None => Self::Sql(error),
        }
    }
}
