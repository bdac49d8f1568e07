//! Order Models

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::models::Address,
        catalog::models::ProductInfoId,
        delivery::pricing::Ineligibility,
        partners::models::ShopId,
    },
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<Order>;

/// Order Line ID
pub type OrderLineId = TypedId<OrderLine>;

/// Marker for order ids. Stored orders surface as [`OrderSummary`] views, or
/// as baskets while still in the `Basket` state.
#[derive(Debug, Clone, Copy)]
pub struct Order;

/// Lifecycle of an order row. `Basket` is the mutable pre-order stage;
/// placement moves it to `New`. The later states belong to fulfilment
/// tooling and are never set by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderState {
    Basket,
    New,
    Confirmed,
    Assembled,
    Sent,
    Delivered,
    Cancelled,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basket => "basket",
            Self::New => "new",
            Self::Confirmed => "confirmed",
            Self::Assembled => "assembled",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "basket" => Some(Self::Basket),
            "new" => Some(Self::New),
            "confirmed" => Some(Self::Confirmed),
            "assembled" => Some(Self::Assembled),
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order, joined with its catalog context for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub product_info_id: ProductInfoId,
    pub product_name: String,
    pub category_name: String,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub price: u64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

/// A buyer's placed order with its lines and goods total.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub state: OrderState,
    pub created_at: Timestamp,
    pub address: Option<Address>,
    pub items: Vec<OrderLine>,
    pub total_sum: u64,
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub state: OrderState,
}

/// The goods subtotal a single shop contributes to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSubtotal {
    pub shop_id: ShopId,
    pub shop_name: String,
    pub subtotal: u64,
}

/// Contact snapshot used to address placement notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerContact {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// One shop that failed the delivery-eligibility sweep, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopIneligibility {
    pub shop_name: String,
    pub reason: Ineligibility,
}

impl Display for ShopIneligibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.shop_name, self.reason)
    }
}
