//! Get Shop State Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::partners::models::Shop;

use crate::{extensions::*, partner::errors::into_status_error, state::State};

/// Partner Shop Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnerShopResponse {
    /// The shop id
    pub id: i64,

    /// The shop name
    pub name: String,

    /// Whether the shop currently accepts orders
    pub state: bool,

    /// The last announced price list URL
    pub price_list_url: Option<String>,

    /// When the price list was last announced
    pub price_list_announced_at: Option<String>,

    /// Whether the catalog already reflects the announced price list
    pub price_list_fresh: bool,
}

impl From<Shop> for PartnerShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id.into_i64(),
            name: shop.name,
            state: shop.state,
            price_list_url: shop.price_list_url,
            price_list_announced_at: shop
                .price_list_announced_at
                .as_ref()
                .map(ToString::to_string),
            price_list_fresh: shop.price_list_fresh,
        }
    }
}

/// Get Shop State Handler
///
/// Returns the caller's shop with its order-acceptance state and price-list
/// source metadata.
#[endpoint(
    tags("partner"),
    summary = "Get Shop State",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Shop state"),
        (status_code = StatusCode::BAD_REQUEST, description = "No shop for this account"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PartnerShopResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let shop = state
        .app
        .partners
        .shop_state(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(shop.into()))
}
