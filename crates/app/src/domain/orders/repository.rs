//! Order storage.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{try_get_amount, try_get_quantity},
    domain::{
        accounts::models::{Address, AddressId, UserId},
        catalog::models::ProductInfoId,
        orders::models::{
            BuyerContact, OrderId, OrderLine, OrderLineId, OrderState, OrderSummary, ShopSubtotal,
        },
        partners::models::ShopId,
    },
};

const SHOP_SUBTOTALS_SQL: &str = include_str!("sql/shop_subtotals.sql");
const PLACE_ORDER_SQL: &str = include_str!("sql/place_order.sql");
const BUYER_CONTACT_SQL: &str = include_str!("sql/buyer_contact.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const ORDER_LINES_SQL: &str = include_str!("sql/order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Per-shop goods subtotals for an order, one row per shop represented
    /// among its lines. An order without lines yields no rows.
    pub(crate) async fn shop_subtotals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<ShopSubtotal>, sqlx::Error> {
        query_as::<Postgres, ShopSubtotal>(SHOP_SUBTOTALS_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Attach the address and move the order out of the basket state. The
    /// caller already holds the basket row lock.
    pub(crate) async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        address: AddressId,
    ) -> Result<(), sqlx::Error> {
        let result = query(PLACE_ORDER_SQL)
            .bind(order.into_i64())
            .bind(address.into_i64())
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    pub(crate) async fn buyer_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<BuyerContact, sqlx::Error> {
        query_as::<Postgres, BuyerContact>(BUYER_CONTACT_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// The user's placed orders, newest first, without their lines.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        query_as::<Postgres, OrderSummary>(LIST_ORDERS_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch the lines of every listed order in one round trip, grouped by
    /// order id. Orders without lines are absent from the map.
    pub(crate) async fn lines_for_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderId],
    ) -> Result<FxHashMap<OrderId, Vec<OrderLine>>, sqlx::Error> {
        let ids: Vec<i64> = orders.iter().map(|order| order.into_i64()).collect();

        let rows = query(ORDER_LINES_SQL)
            .bind(&ids)
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

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderLineId::from_i64(row.try_get("id")?),
            product_info_id: ProductInfoId::from_i64(row.try_get("product_info_id")?),
            product_name: row.try_get("product_name")?,
            category_name: row.try_get("category_name")?,
            shop_id: ShopId::from_i64(row.try_get("shop_id")?),
            shop_name: row.try_get("shop_name")?,
            price: try_get_amount(row, "price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let state: String = row.try_get("state")?;

        let state = OrderState::parse(&state).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "state".to_string(),
            source: format!("unknown order state '{state}'").into(),
        })?;

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
            address,
            items: Vec::new(),
            total_sum: 0,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ShopSubtotal {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            shop_id: ShopId::from_i64(row.try_get("shop_id")?),
            shop_name: row.try_get("shop_name")?,
            subtotal: try_get_amount(row, "subtotal")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BuyerContact {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        })
    }
}
