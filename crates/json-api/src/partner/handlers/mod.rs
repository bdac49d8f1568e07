//! Partner Handlers

pub(crate) mod get_state;
pub(crate) mod list_delivery;
pub(crate) mod orders;
pub(crate) mod set_delivery;
pub(crate) mod set_state;
pub(crate) mod update_price_list;
