//! Add Basket Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::{baskets::models::NewBasketItem, catalog::models::ProductInfoId};

use crate::{basket::errors::into_status_error, extensions::*, state::State};

/// Add Basket Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddBasketItemsRequest {
    /// The lines to add
    pub items: Vec<NewBasketItemRequest>,
}

/// New Basket Item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NewBasketItemRequest {
    /// The product offer to order
    pub product_info: i64,

    /// Number of units, at least 1
    pub quantity: u32,
}

impl From<NewBasketItemRequest> for NewBasketItem {
    fn from(request: NewBasketItemRequest) -> Self {
        NewBasketItem {
            product_info: ProductInfoId::from_i64(request.product_info),
            quantity: request.quantity,
        }
    }
}

/// Basket Items Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketItemsCreatedResponse {
    /// Number of lines added to the basket
    pub created: u64,
}

/// Add Basket Items Handler
///
/// Adds lines to the caller's basket, creating the basket first if none is
/// open. The batch is atomic: one bad line rejects all of them.
#[endpoint(
    tags("basket"),
    summary = "Add Items to Basket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Items added"),
        (status_code = StatusCode::CONFLICT, description = "Item already in basket"),
        (status_code = StatusCode::NOT_FOUND, description = "Product offer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddBasketItemsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BasketItemsCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = json
        .into_inner()
        .items
        .into_iter()
        .map(Into::into)
        .collect();

    let created = state
        .app
        .baskets
        .add_items(user.id, items)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(BasketItemsCreatedResponse { created }))
}
