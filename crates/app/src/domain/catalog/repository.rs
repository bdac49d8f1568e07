//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{try_get_amount, try_get_quantity},
    domain::catalog::models::{
        Category, CategoryId, OfferFilter, ProductOffer, ShopSummary,
    },
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const LIST_SHOPS_SQL: &str = include_str!("sql/list_shops.sql");
const SEARCH_OFFERS_SQL: &str = include_str!("sql/search_offers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Shops that are currently accepting orders.
    pub(crate) async fn list_shops(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ShopSummary>, sqlx::Error> {
        query_as::<Postgres, ShopSummary>(LIST_SHOPS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: OfferFilter,
    ) -> Result<Vec<ProductOffer>, sqlx::Error> {
        query_as::<Postgres, ProductOffer>(SEARCH_OFFERS_SQL)
            .bind(filter.shop.map(|shop| shop.into_i64()))
            .bind(filter.category.map(CategoryId::into_i64))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get::<i64, _>("id")?.into(),
            name: row.try_get("name")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ShopSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get::<i64, _>("id")?.into(),
            name: row.try_get("name")?,
            state: row.try_get("state")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductOffer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get::<i64, _>("id")?.into(),
            product_id: row.try_get::<i64, _>("product_id")?.into(),
            product_name: row.try_get("product_name")?,
            category_id: row.try_get::<i64, _>("category_id")?.into(),
            category_name: row.try_get("category_name")?,
            shop_id: row.try_get::<i64, _>("shop_id")?.into(),
            shop_name: row.try_get("shop_name")?,
            price: try_get_amount(row, "price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}
