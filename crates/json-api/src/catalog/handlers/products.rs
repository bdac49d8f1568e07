//! Product Search Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::{
    catalog::models::{CategoryId, OfferFilter, ProductOffer},
    partners::models::ShopId,
};

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Product Offer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductOfferResponse {
    /// The product offer id, used when adding basket items
    pub id: i64,

    /// The product id
    pub product_id: i64,

    /// The product name
    pub product_name: String,

    /// The category id
    pub category_id: i64,

    /// The category name
    pub category_name: String,

    /// The shop id
    pub shop_id: i64,

    /// The shop name
    pub shop_name: String,

    /// Unit price in cents
    pub price: u64,

    /// Units available
    pub quantity: u32,
}

impl From<ProductOffer> for ProductOfferResponse {
    fn from(offer: ProductOffer) -> Self {
        Self {
            id: offer.id.into_i64(),
            product_id: offer.product_id.into_i64(),
            product_name: offer.product_name,
            category_id: offer.category_id.into_i64(),
            category_name: offer.category_name,
            shop_id: offer.shop_id.into_i64(),
            shop_name: offer.shop_name,
            price: offer.price,
            quantity: offer.quantity,
        }
    }
}

/// Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The matching offers from shops accepting orders
    pub products: Vec<ProductOfferResponse>,
}

/// Product Search Handler
///
/// Returns offers from shops accepting orders, optionally narrowed to one
/// shop or one category.
#[endpoint(tags("catalog"), summary = "Search Products")]
pub(crate) async fn handler(
    shop_id: QueryParam<i64, false>,
    category_id: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = OfferFilter {
        shop: shop_id.into_inner().map(ShopId::from_i64),
        category: category_id.into_inner().map(CategoryId::from_i64),
    };

    let products = state
        .app
        .catalog
        .search_offers(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
