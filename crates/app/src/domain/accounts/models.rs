//! Account Models

use jiff::Timestamp;

use crate::ids::TypedId;

/// User ID
pub type UserId = TypedId<User>;

/// Address ID
pub type AddressId = TypedId<Address>;

/// Account kind: buyers place orders, shops supply them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Buyer,
    Shop,
}

impl UserKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Shop => "shop",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buyer" => Some(Self::Buyer),
            "shop" => Some(Self::Shop),
            _ => None,
        }
    }
}

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub position: String,
    pub kind: UserKind,
    pub created_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub position: String,
    pub kind: UserKind,
}

/// Contact Address Model
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub city: String,
    pub street: String,
    pub house: String,
    pub apartment: String,
}

/// New Contact Address Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub city: String,
    pub street: String,
    pub house: String,
    pub apartment: String,
}
