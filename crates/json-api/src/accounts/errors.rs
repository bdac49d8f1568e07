//! Errors

use salvo::http::StatusError;
use tracing::error;

use tradepost_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Account already exists")
        }
        AccountsServiceError::NotFound => StatusError::not_found(),
        AccountsServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Invalid email address")
        }
        AccountsServiceError::InvalidReference
        | AccountsServiceError::MissingRequiredData
        | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        AccountsServiceError::Sql(source) => {
            error!("accounts storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
