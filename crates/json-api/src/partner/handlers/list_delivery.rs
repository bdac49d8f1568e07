//! List Delivery Tiers Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::delivery::DeliveryTier;

use crate::{extensions::*, partner::errors::into_status_error, state::State};

/// Delivery Tier Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryTierResponse {
    /// Orders with a goods subtotal of at least this amount qualify
    pub min_sum: u64,

    /// Delivery cost in cents at this threshold
    pub cost: u64,
}

impl From<DeliveryTier> for DeliveryTierResponse {
    fn from(tier: DeliveryTier) -> Self {
        Self {
            min_sum: tier.min_sum,
            cost: tier.cost,
        }
    }
}

/// Delivery Tiers Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryTiersResponse {
    /// The shop's delivery price list, cheapest threshold first
    pub tiers: Vec<DeliveryTierResponse>,
}

/// List Delivery Tiers Handler
///
/// Returns the caller's delivery price list.
#[endpoint(
    tags("partner"),
    summary = "List Delivery Tiers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Delivery tiers"),
        (status_code = StatusCode::BAD_REQUEST, description = "No shop for this account"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeliveryTiersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let tiers = state
        .app
        .partners
        .list_delivery_tiers(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeliveryTiersResponse {
        tiers: tiers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tradepost_app::domain::partners::{MockPartnersService, PartnersServiceError};

    use crate::test_helpers::{TEST_PARTNER, partner_service};

    use super::*;

    fn make_service(partners: MockPartnersService) -> Service {
        partner_service(partners, Router::with_path("partner/delivery").get(handler))
    }

    #[tokio::test]
    async fn test_list_delivery_returns_tiers() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners
            .expect_list_delivery_tiers()
            .once()
            .withf(|partner| *partner == TEST_PARTNER.id)
            .return_once(|_| {
                Ok(vec![
                    DeliveryTier {
                        min_sum: 0,
                        cost: 500,
                    },
                    DeliveryTier {
                        min_sum: 3000,
                        cost: 0,
                    },
                ])
            });

        let response: DeliveryTiersResponse = TestClient::get("http://example.com/partner/delivery")
            .send(&make_service(partners))
            .await
            .take_json()
            .await?;

        assert_eq!(response.tiers.len(), 2, "expected two tiers");
        assert_eq!(response.tiers[0].min_sum, 0);
        assert_eq!(response.tiers[0].cost, 500);
        assert_eq!(response.tiers[1].cost, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_delivery_without_shop_returns_400() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners
            .expect_list_delivery_tiers()
            .once()
            .return_once(|_| Err(PartnersServiceError::NoShop));

        let res = TestClient::get("http://example.com/partner/delivery")
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
