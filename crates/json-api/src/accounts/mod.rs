//! Accounts

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;
