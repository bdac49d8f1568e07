//! Database connection management

use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Decode a `BIGINT` money column into `u64`, rejecting negative values.
pub(crate) fn try_get_amount(row: &PgRow, index: &str) -> Result<u64, sqlx::Error> {
    let amount: i64 = row.try_get(index)?;

    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

/// Decode an `INTEGER` quantity column into `u32`, rejecting negative values.
pub(crate) fn try_get_quantity(row: &PgRow, index: &str) -> Result<u32, sqlx::Error> {
    let quantity: i32 = row.try_get(index)?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}
