//! Partners service errors.

use sqlx::Error;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PartnersServiceError {
    /// The account has no shop yet. Only the price-list announcement may
    /// create one.
    #[error("no shop for this account")]
    NoShop,

    #[error("invalid price list url")]
    InvalidUrl,

    #[error("no delivery tiers given")]
    EmptyTiers,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PartnersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NoShop;
        }

        Self::Sql(error)
    }
}
