//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedApiToken,
        models::AuthenticatedUser,
        repository::PgAuthRepository,
        token::{generate_api_token, hash_api_token},
    },
    domain::accounts::models::UserId,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error when the user does not exist or the insert fails.
    pub async fn issue_api_token(&self, user: UserId) -> Result<IssuedApiToken, AuthServiceError> {
        let token = generate_api_token();

        let metadata = self
            .repository
            .create_api_token(Uuid::now_v7(), user, &hash_api_token(&token))
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        self.repository
            .find_user_by_token_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the account it authenticates.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
