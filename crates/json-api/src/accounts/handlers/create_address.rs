//! Create Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::accounts::models::NewAddress;

use crate::{
    accounts::{errors::into_status_error, handlers::AddressResponse},
    extensions::*,
    state::State,
};

/// Create Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAddressRequest {
    /// City
    pub city: String,

    /// Street
    pub street: String,

    /// House number
    pub house: String,

    /// Apartment, optional
    #[serde(default)]
    pub apartment: String,
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(request: CreateAddressRequest) -> Self {
        NewAddress {
            city: request.city,
            street: request.street,
            house: request.house,
            apartment: request.apartment,
        }
    }
}

/// Create Address Handler
///
/// Stores a delivery address for the caller.
#[endpoint(
    tags("accounts"),
    summary = "Create Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let address = state
        .app
        .accounts
        .create_address(user.id, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(address.into()))
}
