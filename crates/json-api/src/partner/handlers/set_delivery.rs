//! Set Delivery Tiers Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::delivery::DeliveryTier;

use crate::{extensions::*, partner::errors::into_status_error, state::State};

/// Set Delivery Tiers Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetDeliveryTiersRequest {
    /// The tiers to upsert, keyed by `min_sum`
    pub tiers: Vec<DeliveryTierRequest>,
}

/// Delivery Tier
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryTierRequest {
    /// Orders with a goods subtotal of at least this amount qualify
    pub min_sum: u64,

    /// Delivery cost in cents at this threshold
    pub cost: u64,
}

impl From<DeliveryTierRequest> for DeliveryTier {
    fn from(request: DeliveryTierRequest) -> Self {
        DeliveryTier {
            min_sum: request.min_sum,
            cost: request.cost,
        }
    }
}

/// Set Delivery Tiers Handler
///
/// Upserts the caller's delivery price list. Existing thresholds get the new
/// cost; new thresholds are added.
#[endpoint(
    tags("partner"),
    summary = "Set Delivery Tiers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tiers stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SetDeliveryTiersRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let tiers = json
        .into_inner()
        .tiers
        .into_iter()
        .map(Into::into)
        .collect();

    state
        .app
        .partners
        .set_delivery_tiers(user.id, tiers)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use tradepost_app::domain::partners::{MockPartnersService, PartnersServiceError};

    use crate::test_helpers::{TEST_PARTNER, partner_service};

    use super::*;

    fn make_service(partners: MockPartnersService) -> Service {
        partner_service(partners, Router::with_path("partner/delivery").put(handler))
    }

    #[tokio::test]
    async fn test_set_delivery_returns_200() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners
            .expect_set_delivery_tiers()
            .once()
            .withf(|partner, tiers| {
                *partner == TEST_PARTNER.id
                    && tiers
                        == &[
                            DeliveryTier {
                                min_sum: 0,
                                cost: 500,
                            },
                            DeliveryTier {
                                min_sum: 3000,
                                cost: 0,
                            },
                        ]
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::put("http://example.com/partner/delivery")
            .json(&json!({
                "tiers": [
                    { "min_sum": 0, "cost": 500 },
                    { "min_sum": 3000, "cost": 0 },
                ],
            }))
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_delivery_empty_batch_returns_400() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners
            .expect_set_delivery_tiers()
            .once()
            .withf(|_, tiers| tiers.is_empty())
            .return_once(|_, _| Err(PartnersServiceError::EmptyTiers));

        let res = TestClient::put("http://example.com/partner/delivery")
            .json(&json!({ "tiers": [] }))
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_delivery_negative_cost_returns_400() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners.expect_set_delivery_tiers().never();

        let res = TestClient::put("http://example.com/partner/delivery")
            .json(&json!({ "tiers": [{ "min_sum": 0, "cost": -5 }] }))
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
