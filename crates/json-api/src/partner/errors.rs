//! Errors

use salvo::http::StatusError;
use tracing::error;

use tradepost_app::domain::partners::PartnersServiceError;

pub(crate) fn into_status_error(error: PartnersServiceError) -> StatusError {
    match error {
        PartnersServiceError::NoShop => {
            StatusError::bad_request().brief("No shop for this account")
        }
        PartnersServiceError::InvalidUrl => {
            StatusError::bad_request().brief("Invalid price list url")
        }
        PartnersServiceError::EmptyTiers => {
            StatusError::bad_request().brief("No delivery tiers given")
        }
        PartnersServiceError::Sql(source) => {
            error!("partners storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
