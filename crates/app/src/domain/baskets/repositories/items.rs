//! Basket line storage.

use sqlx::{Postgres, Transaction, query, query_as};

use crate::domain::{
    baskets::models::NewBasketItem,
    orders::models::{OrderId, OrderLine, OrderLineId},
};

const BASKET_LINES_SQL: &str = include_str!("../sql/basket_lines.sql");
const CREATE_ITEM_SQL: &str = include_str!("../sql/create_item.sql");
const UPDATE_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_item_quantity.sql");
const DELETE_ITEMS_SQL: &str = include_str!("../sql/delete_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBasketItemsRepository;

impl PgBasketItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The basket's lines joined with product, category and shop display
    /// data, in insertion order.
    pub(crate) async fn basket_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(BASKET_LINES_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        item: NewBasketItem,
    ) -> Result<(), sqlx::Error> {
        let quantity = i32::try_from(item.quantity).map_err(into_encode_error)?;

        query(CREATE_ITEM_SQL)
            .bind(order.into_i64())
            .bind(item.product_info.into_i64())
            .bind(quantity)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Set a line's quantity. The order id is part of the predicate, so a
    /// line id belonging to another order updates nothing.
    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        item: OrderLineId,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let quantity = i32::try_from(quantity).map_err(into_encode_error)?;

        let rows_affected = query(UPDATE_ITEM_QUANTITY_SQL)
            .bind(order.into_i64())
            .bind(item.into_i64())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete the listed lines from the order in one statement.
    pub(crate) async fn delete_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        items: &[OrderLineId],
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<i64> = items.iter().map(|item| item.into_i64()).collect();

        let rows_affected = query(DELETE_ITEMS_SQL)
            .bind(order.into_i64())
            .bind(&ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn into_encode_error(e: std::num::TryFromIntError) -> sqlx::Error {
    sqlx::Error::Encode(Box::new(e))
}
