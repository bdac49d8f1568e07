//! Place Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::accounts::models::AddressId;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    /// The delivery address to ship to
    pub address_id: i64,
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// The placed order id, the same id the basket had
    pub id: i64,

    /// Lifecycle state after placement, always `new`
    pub state: String,
}

/// Place Order Handler
///
/// Turns the caller's basket into a placed order. Every shop in the basket
/// must clear its delivery rules or the whole placement is rejected.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.place",
    skip(json, depot, res),
    fields(
        user_id = tracing::field::Empty,
        address_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let address = AddressId::from_i64(json.into_inner().address_id);

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(user.id));
    span.record("address_id", tracing::field::display(address));

    let placed = state
        .app
        .orders
        .place_order(user.id, address)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_id = %placed.id, "placed order");

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        id: placed.id.into_i64(),
        state: placed.state.to_string(),
    }))
}
