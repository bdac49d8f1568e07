//! Accounts

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;
