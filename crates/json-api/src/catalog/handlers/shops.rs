//! Shop Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::catalog::models::ShopSummary;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Shop Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShopResponse {
    /// The shop id
    pub id: i64,

    /// The shop name
    pub name: String,

    /// Whether the shop currently accepts orders
    pub state: bool,
}

impl From<ShopSummary> for ShopResponse {
    fn from(shop: ShopSummary) -> Self {
        Self {
            id: shop.id.into_i64(),
            name: shop.name,
            state: shop.state,
        }
    }
}

/// Shops Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShopsResponse {
    /// The shops currently accepting orders
    pub shops: Vec<ShopResponse>,
}

/// Shop Index Handler
///
/// Returns the shops currently accepting orders.
#[endpoint(tags("catalog"), summary = "List Shops")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ShopsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let shops = state
        .app
        .catalog
        .list_shops()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShopsResponse {
        shops: shops.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tradepost_app::domain::{
        catalog::{CatalogServiceError, MockCatalogService},
        partners::models::ShopId,
    };

    use crate::test_helpers::catalog_service;

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("shops").get(handler))
    }

    #[tokio::test]
    async fn test_shops_returns_list() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_shops().once().return_once(|| {
            Ok(vec![ShopSummary {
                id: ShopId::from_i64(1),
                name: "Teaware".to_string(),
                state: true,
            }])
        });

        let response: ShopsResponse = TestClient::get("http://example.com/shops")
            .send(&make_service(catalog))
            .await
            .take_json()
            .await?;

        assert_eq!(response.shops.len(), 1, "expected one shop");
        assert_eq!(response.shops[0].name, "Teaware");
        assert!(response.shops[0].state);

        Ok(())
    }

    #[tokio::test]
    async fn test_shops_storage_error_returns_500() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_shops()
            .once()
            .return_once(|| Err(CatalogServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/shops")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
