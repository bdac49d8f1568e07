//! List Addresses Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    accounts::{errors::into_status_error, handlers::AddressResponse},
    extensions::*,
    state::State,
};

/// Addresses Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressesResponse {
    /// The caller's stored delivery addresses
    pub addresses: Vec<AddressResponse>,
}

/// List Addresses Handler
///
/// Returns the caller's stored delivery addresses.
#[endpoint(tags("accounts"), summary = "List Addresses", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AddressesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let addresses = state
        .app
        .accounts
        .list_addresses(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AddressesResponse {
        addresses: addresses.into_iter().map(Into::into).collect(),
    }))
}
