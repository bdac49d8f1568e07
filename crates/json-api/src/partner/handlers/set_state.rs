//! Set Shop State Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, partner::errors::into_status_error, state::State};

/// Set Shop State Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetShopStateRequest {
    /// `true` to accept orders, `false` to pause
    pub state: bool,
}

/// Set Shop State Handler
///
/// Switches the caller's shop in or out of order acceptance. Paused shops
/// disappear from the public catalog.
#[endpoint(
    tags("partner"),
    summary = "Set Shop State",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "State changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SetShopStateRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .partners
        .set_shop_state(user.id, json.into_inner().state)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
