//! Update Price List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    partner::{errors::into_status_error, handlers::get_state::PartnerShopResponse},
    state::State,
};

/// Update Price List Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePriceListRequest {
    /// URL of the price list to ingest
    pub url: String,
}

/// Update Price List Handler
///
/// Announces a new price list for the caller's shop, creating the shop on
/// first use. Ingestion runs separately; until it catches up the shop is
/// marked stale.
#[endpoint(
    tags("partner"),
    summary = "Update Price List",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Price list announced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid price list url"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdatePriceListRequest>,
    depot: &mut Depot,
) -> Result<Json<PartnerShopResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let shop = state
        .app
        .partners
        .update_price_list(user.id, json.into_inner().url)
        .await
        .map_err(into_status_error)?;

    Ok(Json(shop.into()))
}
