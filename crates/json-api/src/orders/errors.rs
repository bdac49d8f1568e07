//! Errors

use salvo::http::StatusError;
use tracing::error;

use tradepost_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NoBasket => StatusError::bad_request().brief("No active basket"),

        // The rendered message carries one entry per failing shop.
        error @ OrdersServiceError::DeliveryIneligible(_) => {
            StatusError::bad_request().brief(error.to_string())
        }

        OrdersServiceError::AddressNotFound => StatusError::not_found().brief("Address not found"),

        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
