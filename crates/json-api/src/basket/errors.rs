//! Errors

use salvo::http::StatusError;
use tracing::error;

use tradepost_app::domain::baskets::BasketsServiceError;

pub(crate) fn into_status_error(error: BasketsServiceError) -> StatusError {
    match error {
        BasketsServiceError::EmptyItems => StatusError::bad_request().brief("No items provided"),
        BasketsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be positive")
        }
        BasketsServiceError::DuplicateItem => {
            StatusError::conflict().brief("Item already in basket")
        }
        BasketsServiceError::UnknownProductInfo => {
            StatusError::not_found().brief("Product offer not found")
        }
        BasketsServiceError::NoBasket => StatusError::bad_request().brief("No active basket"),
        BasketsServiceError::NoMatchingItems => {
            StatusError::bad_request().brief("No matching basket items")
        }
        BasketsServiceError::Sql(source) => {
            error!("basket storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
