//! Get Basket Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::{baskets::models::Basket, orders::models::OrderLine};

use crate::{basket::errors::into_status_error, extensions::*, state::State};

/// Basket Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketResponse {
    /// The open basket, or `null` when the user has none yet
    pub basket: Option<BasketContents>,
}

/// Basket Contents
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketContents {
    /// The order id of the basket
    pub id: i64,

    /// The date and time the basket was created
    pub created_at: String,

    /// The lines in the basket
    pub items: Vec<BasketItemResponse>,

    /// The goods total in cents, delivery excluded
    pub total_sum: u64,
}

impl From<Basket> for BasketContents {
    fn from(basket: Basket) -> Self {
        Self {
            id: basket.id.into_i64(),
            created_at: basket.created_at.to_string(),
            items: basket
                .items
                .into_iter()
                .map(BasketItemResponse::from)
                .collect(),
            total_sum: basket.total_sum,
        }
    }
}

/// Basket Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketItemResponse {
    /// The basket line id
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

impl From<OrderLine> for BasketItemResponse {
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

/// Get Basket Handler
///
/// Returns the caller's open basket.
#[endpoint(tags("basket"), summary = "Get Basket", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BasketResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let basket = state
        .app
        .baskets
        .get_basket(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BasketResponse {
        basket: basket.map(BasketContents::from),
    }))
}
