//! Partner Models

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::models::{Address, UserId},
        orders::models::{OrderId, OrderLine, OrderState},
    },
    ids::TypedId,
};

/// Shop ID
pub type ShopId = TypedId<Shop>;

/// Shop Model
///
/// The price-list fields record what the partner last announced; actual
/// ingestion of the list happens outside this crate and flips
/// `price_list_fresh` back to `true` once the catalog matches it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    pub id: ShopId,
    pub user_id: Option<UserId>,
    pub name: String,
    pub state: bool,
    pub price_list_url: Option<String>,
    pub price_list_announced_at: Option<Timestamp>,
    pub price_list_fresh: bool,
}

/// A placed order as the supplying partner sees it: only the lines sourced
/// from the partner's shop, with the subtotal restricted to those lines.
#[derive(Debug, Clone)]
pub struct PartnerOrder {
    pub id: OrderId,
    pub state: OrderState,
    pub created_at: Timestamp,
    pub buyer_email: String,
    pub buyer_name: String,
    pub address: Option<Address>,
    pub items: Vec<OrderLine>,
    pub subtotal: u64,
}
