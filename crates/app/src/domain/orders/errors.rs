//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;

use crate::domain::orders::models::ShopIneligibility;

#[derive(Debug, ThisError)]
pub enum OrdersServiceError {
    #[error("no basket-state order")]
    NoBasket,

    /// One or more shops cannot deliver at the basket's current subtotals.
    /// Carries every failing shop, never just the first.
    #[error("delivery unavailable: {}", render_ineligible(.0))]
    DeliveryIneligible(Vec<ShopIneligibility>),

    #[error("address not found")]
    AddressNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NoBasket;
        }

        // The only foreign key touched at placement is the address column.
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::AddressNotFound,
            Some(_) | None => Self::Sql(error),
        }
    }
}

fn render_ineligible(shops: &[ShopIneligibility]) -> String {
    let rendered: Vec<String> = shops.iter().map(ToString::to_string).collect();

    rendered.join("; ")
}
