//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::orders::models::{OrderLine, OrderSummary};

use crate::{
    accounts::handlers::AddressResponse, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The order id
    pub id: i64,

    /// Lifecycle state, `new` right after placement
    pub state: String,

    /// The date and time the order was created
    pub created_at: String,

    /// The delivery address chosen at placement
    pub address: Option<AddressResponse>,

    /// The order lines
    pub items: Vec<OrderLineResponse>,

    /// The goods total in cents, delivery excluded
    pub total_sum: u64,
}

impl From<OrderSummary> for OrderResponse {
    fn from(order: OrderSummary) -> Self {
        Self {
            id: order.id.into_i64(),
            state: order.state.to_string(),
            created_at: order.created_at.to_string(),
            address: order.address.map(AddressResponse::from),
            items: order.items.into_iter().map(OrderLineResponse::from).collect(),
            total_sum: order.total_sum,
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The order line id
    pub id: i64,

    /// The product offer this line points at
    pub product_info: i64,

    /// The product name
    pub product_name: String,

    /// The category the product belongs to
    pub category_name: String,

    /// The shop supplying the offer
    pub shop_id: i64,

    /// The shop name
    pub shop_name: String,

    /// Unit price in cents
    pub price: u64,

    /// Number of units in the line
    pub quantity: u32,

    /// Line total in cents
    pub sum: u64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id.into_i64(),
            product_info: line.product_info_id.into_i64(),
            sum: line.line_total(),
            product_name: line.product_name,
            category_name: line.category_name,
            shop_id: line.shop_id.into_i64(),
            shop_name: line.shop_name,
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The caller's placed orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Returns the caller's placed orders. The open basket is not an order yet
/// and is never listed here.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
