//! Tradepost Domain Concerns

pub mod accounts;
pub mod baskets;
pub mod catalog;
pub mod delivery;
pub mod orders;
pub mod partners;
