//! Delivery cost resolution.

use thiserror::Error;

use crate::domain::delivery::models::DeliveryTier;

/// Why a shop cannot deliver a given subtotal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// The shop has published no delivery tiers at all.
    #[error("delivery cost unavailable")]
    NoTiers,

    /// Every tier's threshold is above the order's subtotal for this shop.
    #[error("order subtotal below shop minimum")]
    BelowMinimum,
}

/// Pick the delivery cost for a shop: the tier with the greatest `min_sum`
/// not exceeding `subtotal` wins. Tier order does not matter.
///
/// # Errors
///
/// Returns the [`Ineligibility`] reason when no tier matches.
pub fn resolve_delivery(tiers: &[DeliveryTier], subtotal: u64) -> Result<u64, Ineligibility> {
    if tiers.is_empty() {
        return Err(Ineligibility::NoTiers);
    }

    tiers
        .iter()
        .filter(|tier| tier.min_sum <= subtotal)
        .max_by_key(|tier| tier.min_sum)
        .map(|tier| tier.cost)
        .ok_or(Ineligibility::BelowMinimum)
}
