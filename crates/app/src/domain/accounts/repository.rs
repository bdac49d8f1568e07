//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::accounts::models::{Address, NewAddress, NewUser, User, UserId, UserKind};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.company)
            .bind(&user.position)
            .bind(user.kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        address: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(CREATE_ADDRESS_SQL)
            .bind(user.into_i64())
            .bind(&address.city)
            .bind(&address.street)
            .bind(&address.house)
            .bind(&address.apartment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LIST_ADDRESSES_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        let kind = UserKind::parse(&kind).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: format!("unknown user kind '{kind}'").into(),
        })?;

        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            company: row.try_get("company")?,
            position: row.try_get("position")?,
            kind,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get::<i64, _>("id")?.into(),
            user_id: row.try_get::<i64, _>("user_id")?.into(),
            city: row.try_get("city")?,
            street: row.try_get("street")?,
            house: row.try_get("house")?,
            apartment: row.try_get("apartment")?,
        })
    }
}
