//! Delivery price list storage.
//!
//! Shared by the partners service (tier management) and the orders service
//! (eligibility sweep at placement).

use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::try_get_amount,
    domain::{delivery::models::DeliveryTier, partners::models::ShopId},
};

const LIST_TIERS_SQL: &str = include_str!("sql/list_tiers.sql");
const TIERS_FOR_SHOPS_SQL: &str = include_str!("sql/tiers_for_shops.sql");
const UPSERT_TIER_SQL: &str = include_str!("sql/upsert_tier.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDeliveryRepository;

impl PgDeliveryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_tiers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: ShopId,
    ) -> Result<Vec<DeliveryTier>, sqlx::Error> {
        query_as::<Postgres, DeliveryTier>(LIST_TIERS_SQL)
            .bind(shop.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch the tiers of every listed shop in one round trip. Shops with no
    /// tiers are absent from the map.
    pub(crate) async fn tiers_for_shops(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shops: &[ShopId],
    ) -> Result<FxHashMap<ShopId, Vec<DeliveryTier>>, sqlx::Error> {
        let ids: Vec<i64> = shops.iter().map(|shop| shop.into_i64()).collect();

        let rows = query(TIERS_FOR_SHOPS_SQL)
            .bind(&ids)
            .fetch_all(&mut **tx)
            .await?;

        let mut tiers: FxHashMap<ShopId, Vec<DeliveryTier>> = FxHashMap::default();

        for row in rows {
            let shop = ShopId::from_i64(row.try_get("shop_id")?);

            tiers
                .entry(shop)
                .or_default()
                .push(DeliveryTier::from_row(&row)?);
        }

        Ok(tiers)
    }

    pub(crate) async fn upsert_tier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: ShopId,
        tier: DeliveryTier,
    ) -> Result<(), sqlx::Error> {
        let min_sum = i64::try_from(tier.min_sum).map_err(into_encode_error)?;
        let cost = i64::try_from(tier.cost).map_err(into_encode_error)?;

        query(UPSERT_TIER_SQL)
            .bind(shop.into_i64())
            .bind(min_sum)
            .bind(cost)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for DeliveryTier {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            min_sum: try_get_amount(row, "min_sum")?,
            cost: try_get_amount(row, "cost")?,
        })
    }
}

fn into_encode_error(e: std::num::TryFromIntError) -> sqlx::Error {
    sqlx::Error::Encode(Box::new(e))
}
