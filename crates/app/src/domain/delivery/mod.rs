//! Delivery Pricing

pub mod models;
pub mod pricing;

pub(crate) mod repository;

pub use models::DeliveryTier;
pub use pricing::{Ineligibility, resolve_delivery};
