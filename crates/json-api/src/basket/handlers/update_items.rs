//! Update Basket Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::{baskets::models::BasketItemChange, orders::models::OrderLineId};

use crate::{basket::errors::into_status_error, extensions::*, state::State};

/// Update Basket Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateBasketItemsRequest {
    /// The line changes to apply
    pub items: Vec<BasketItemChangeRequest>,
}

/// Basket Item Change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketItemChangeRequest {
    /// The basket line to change
    pub id: i64,

    /// The new quantity; `0` deletes the line
    pub quantity: u32,
}

impl From<BasketItemChangeRequest> for BasketItemChange {
    fn from(request: BasketItemChangeRequest) -> Self {
        BasketItemChange {
            item: OrderLineId::from_i64(request.id),
            quantity: request.quantity,
        }
    }
}

/// Basket Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketUpdatedResponse {
    /// Number of lines whose quantity changed
    pub updated: u64,

    /// Number of lines removed
    pub deleted: u64,
}

/// Update Basket Items Handler
///
/// Changes line quantities in the caller's basket. A quantity of zero
/// removes the line. Lines belonging to other users are ignored.
#[endpoint(
    tags("basket"),
    summary = "Update Basket Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Basket updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateBasketItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<BasketUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = json
        .into_inner()
        .items
        .into_iter()
        .map(Into::into)
        .collect();

    let update = state
        .app
        .baskets
        .update_items(user.id, items)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BasketUpdatedResponse {
        updated: update.updated,
        deleted: update.deleted,
    }))
}
