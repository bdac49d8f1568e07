//! Account Handlers

pub(crate) mod create_address;
pub(crate) mod list_addresses;
pub(crate) mod register;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use tradepost_app::domain::accounts::models::Address;

/// Contact Address Response
///
/// Shared by the address endpoints and by order views, which embed the
/// delivery address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    /// The address id
    pub id: i64,

    /// City
    pub city: String,

    /// Street
    pub street: String,

    /// House number
    pub house: String,

    /// Apartment, empty when not applicable
    pub apartment: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.into_i64(),
            city: address.city,
            street: address.street,
            house: address.house,
            apartment: address.apartment,
        }
    }
}
