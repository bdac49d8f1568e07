//! Basket order storage.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{accounts::models::UserId, baskets::models::Basket, orders::models::OrderId};

const ENSURE_BASKET_SQL: &str = include_str!("../sql/ensure_basket.sql");
const FIND_BASKET_SQL: &str = include_str!("../sql/find_basket.sql");
const FIND_BASKET_FOR_UPDATE_SQL: &str = include_str!("../sql/find_basket_for_update.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBasketsRepository;

impl PgBasketsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The user's basket order, if one exists. Read-only; takes no lock.
    pub(crate) async fn find_basket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<Basket>, sqlx::Error> {
        query_as::<Postgres, Basket>(FIND_BASKET_SQL)
            .bind(user.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// The user's basket order, row-locked for the rest of the transaction.
    /// Mutating callers go through this so basket edits and order placement
    /// serialize against each other.
    pub(crate) async fn find_basket_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<OrderId>, sqlx::Error> {
        let row = query(FIND_BASKET_FOR_UPDATE_SQL)
            .bind(user.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| row.try_get("id").map(OrderId::from_i64))
            .transpose()
    }

    /// Get-or-create the user's basket order and lock it. The insert is
    /// guarded by the one-basket-per-user partial unique index, so two
    /// racing calls converge on the same row.
    pub(crate) async fn get_or_create_basket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<OrderId, sqlx::Error> {
        query(ENSURE_BASKET_SQL)
            .bind(user.into_i64())
            .execute(&mut **tx)
            .await?;

        let row = query(FIND_BASKET_FOR_UPDATE_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::from_i64(row.try_get("id")?))
    }
}

impl<'r> FromRow<'r, PgRow> for Basket {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            items: Vec::new(),
            total_sum: 0,
        })
    }
}
