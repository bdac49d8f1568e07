//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::accounts::models::{UserId, UserKind};

/// The account a bearer token resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub kind: UserKind,
}

/// API token metadata persisted in storage. The raw token itself is never
/// stored.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub created_at: Timestamp,
}

/// API token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
