//! Shop and partner order storage.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    accounts::models::{Address, AddressId, UserId},
    orders::models::{OrderId, OrderLine, OrderState},
    partners::models::{PartnerOrder, Shop, ShopId},
};

const FIND_SHOP_BY_OWNER_SQL: &str = include_str!("sql/find_shop_by_owner.sql");
const ENSURE_SHOP_SQL: &str = include_str!("sql/ensure_shop.sql");
const SET_SHOP_STATE_SQL: &str = include_str!("sql/set_shop_state.sql");
const ANNOUNCE_PRICE_LIST_SQL: &str = include_str!("sql/announce_price_list.sql");
const PARTNER_ORDERS_SQL: &str = include_str!("sql/partner_orders.sql");
const SHOP_ORDER_LINES_SQL: &str = include_str!("sql/shop_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPartnersRepository;

impl PgPartnersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_shop_by_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
    ) -> Result<Option<Shop>, sqlx::Error> {
        query_as::<Postgres, Shop>(FIND_SHOP_BY_OWNER_SQL)
            .bind(owner.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Create the owner's shop with a placeholder name unless one already
    /// exists. Guarded by the one-shop-per-owner unique constraint.
    pub(crate) async fn ensure_shop(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        placeholder_name: &str,
    ) -> Result<(), sqlx::Error> {
        query(ENSURE_SHOP_SQL)
            .bind(owner.into_i64())
            .bind(placeholder_name)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Record a freshly announced price list on the owner's shop and return
    /// the updated row.
    pub(crate) async fn announce_price_list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        url: &str,
    ) -> Result<Shop, sqlx::Error> {
        query_as::<Postgres, Shop>(ANNOUNCE_PRICE_LIST_SQL)
            .bind(owner.into_i64())
            .bind(url)
            .fetch_one(&mut **tx)
            .await
    }

    /// Flip order acceptance for the owner's shop; the count of affected
    /// rows tells the caller whether a shop existed at all.
    pub(crate) async fn set_shop_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        state: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = query(SET_SHOP_STATE_SQL)
            .bind(owner.into_i64())
            .bind(state)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    /// Placed orders containing at least one line from the shop, newest
    /// first, without their lines.
    pub(crate) async fn partner_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: ShopId,
    ) -> Result<Vec<PartnerOrder>, sqlx::Error> {
        query_as::<Postgres, PartnerOrder>(PARTNER_ORDERS_SQL)
            .bind(shop.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// The listed orders' lines restricted to the shop, grouped by order id.
    pub(crate) async fn shop_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderId],
        shop: ShopId,
    ) -> Result<FxHashMap<OrderId, Vec<OrderLine>>, sqlx::Error> {
        let ids: Vec<i64> = orders.iter().map(|order| order.into_i64()).collect();

        let rows = query(SHOP_ORDER_LINES_SQL)
            .bind(&ids)
            .bind(shop.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: FxHashMap<OrderId, Vec<OrderLine>> = FxHashMap::default();

        for row in rows {
            let order = OrderId::from_i64(row.try_get("order_id")?);

            lines
                .entry(order)
                .or_default()
                .push(OrderLine::from_row(&row)?);
        }

        Ok(lines)
    }
}

impl<'r> FromRow<'r, PgRow> for Shop {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ShopId::from_i64(row.try_get("id")?),
            user_id: row
                .try_get::<Option<i64>, _>("user_id")?
                .map(UserId::from_i64),
            name: row.try_get("name")?,
            state: row.try_get("state")?,
            price_list_url: row.try_get("price_list_url")?,
            price_list_announced_at: row
                .try_get::<Option<SqlxTimestamp>, _>("price_list_announced_at")?
                .map(|at| at.to_jiff()),
            price_list_fresh: row.try_get("price_list_fresh")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PartnerOrder {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let state: String = row.try_get("state")?;

        let state = OrderState::parse(&state).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "state".to_string(),
            source: format!("unknown order state '{state}'").into(),
        })?;

        let first_name: String = row.try_get("buyer_first_name")?;
        let last_name: String = row.try_get("buyer_last_name")?;

        let address = match row.try_get::<Option<i64>, _>("address_id")? {
            Some(id) => Some(Address {
                id: AddressId::from_i64(id),
                user_id: UserId::from_i64(row.try_get("address_user_id")?),
                city: row.try_get("city")?,
                street: row.try_get("street")?,
                house: row.try_get("house")?,
                apartment: row.try_get("apartment")?,
            }),
            None => None,
        };

        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            state,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            buyer_email: row.try_get("buyer_email")?,
            buyer_name: format!("{first_name} {last_name}"),
            address,
            items: Vec::new(),
            subtotal: 0,
        })
    }
}
