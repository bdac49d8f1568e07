//! Delivery Models

/// One row of a shop's delivery price list: orders with a goods subtotal of
/// at least `min_sum` ship for `cost`. A shop's tiers are unique per
/// `min_sum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryTier {
    pub min_sum: u64,
    pub cost: u64,
}
