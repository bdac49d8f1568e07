//! Partners

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::PartnersServiceError;
pub use service::*;
