//! Basket Models

use jiff::Timestamp;

use crate::domain::{
    catalog::models::ProductInfoId,
    orders::models::{OrderId, OrderLine, OrderLineId},
};

/// The user's open order: the single `basket`-state order, with its lines
/// and the goods total (delivery not included).
#[derive(Debug, Clone)]
pub struct Basket {
    pub id: OrderId,
    pub created_at: Timestamp,
    pub items: Vec<OrderLine>,
    pub total_sum: u64,
}

/// A line to add to the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBasketItem {
    pub product_info: ProductInfoId,
    pub quantity: u32,
}

/// One requested change to an existing basket line. Quantity `0` is a
/// deletion request, never a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasketItemChange {
    pub item: OrderLineId,
    pub quantity: u32,
}

/// Counts reported back from a basket update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasketUpdate {
    pub updated: u64,
    pub deleted: u64,
}
