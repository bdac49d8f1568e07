//! Basket Handlers

pub(crate) mod add_items;
pub(crate) mod get;
pub(crate) mod update_items;
