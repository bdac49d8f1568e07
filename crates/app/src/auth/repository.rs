//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    auth::models::{ApiTokenMetadata, AuthenticatedUser},
    domain::accounts::models::{UserId, UserKind},
};

const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<AuthenticatedUser>, sqlx::Error> {
        query_as::<Postgres, AuthenticatedUser>(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        uuid: Uuid,
        user: UserId,
        token_hash: &str,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(uuid)
            .bind(user.into_i64())
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AuthenticatedUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        let kind = UserKind::parse(&kind).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: format!("unknown user kind '{kind}'").into(),
        })?;

        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            kind,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_id: UserId::from_i64(row.try_get("user_id")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
