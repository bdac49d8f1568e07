//! Partner Orders Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::partners::models::PartnerOrder;

use crate::{
    accounts::handlers::AddressResponse, extensions::*, orders::handlers::index::OrderLineResponse,
    partner::errors::into_status_error, state::State,
};

/// Partner Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnerOrderResponse {
    /// The order id
    pub id: i64,

    /// Lifecycle state
    pub state: String,

    /// The date and time the order was created
    pub created_at: String,

    /// The buyer's email
    pub buyer_email: String,

    /// The buyer's full name
    pub buyer_name: String,

    /// The delivery address chosen at placement
    pub address: Option<AddressResponse>,

    /// Only the lines this shop supplies
    pub items: Vec<OrderLineResponse>,

    /// Goods subtotal of this shop's lines, in cents
    pub subtotal: u64,
}

impl From<PartnerOrder> for PartnerOrderResponse {
    fn from(order: PartnerOrder) -> Self {
        Self {
            id: order.id.into_i64(),
            state: order.state.to_string(),
            created_at: order.created_at.to_string(),
            buyer_email: order.buyer_email,
            buyer_name: order.buyer_name,
            address: order.address.map(AddressResponse::from),
            items: order
                .items
                .into_iter()
                .map(OrderLineResponse::from)
                .collect(),
            subtotal: order.subtotal,
        }
    }
}

/// Partner Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnerOrdersResponse {
    /// Placed orders containing this shop's goods, newest first
    pub orders: Vec<PartnerOrderResponse>,
}

/// Partner Orders Handler
///
/// Returns placed orders containing the caller's goods, restricted to the
/// lines the caller's shop supplies.
#[endpoint(
    tags("partner"),
    summary = "List Partner Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "No shop for this account"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PartnerOrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let orders = state
        .app
        .partners
        .list_orders(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PartnerOrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tradepost_app::domain::partners::{MockPartnersService, PartnersServiceError};

    use crate::{
        partner::handlers::tests::make_partner_order,
        test_helpers::{TEST_PARTNER, make_line, partner_service},
    };

    use super::*;

    fn make_service(partners: MockPartnersService) -> Service {
        partner_service(partners, Router::with_path("partner/orders").get(handler))
    }

    #[tokio::test]
    async fn test_orders_returns_list() -> TestResult {
        let mut partners = MockPartnersService::new();
        let order = make_partner_order(31, vec![make_line(4, 250, 2)]);

        partners
            .expect_list_orders()
            .once()
            .withf(|partner| *partner == TEST_PARTNER.id)
            .return_once(move |_| Ok(vec![order]));

        let response: PartnerOrdersResponse = TestClient::get("http://example.com/partner/orders")
            .send(&make_service(partners))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 1, "expected one order");

        let order = &response.orders[0];

        assert_eq!(order.id, 31);
        assert_eq!(order.buyer_email, "jane@example.com");
        assert_eq!(order.subtotal, 500);
        assert_eq!(order.items[0].shop_name, "Teaware");

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_returns_empty_list() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners
            .expect_list_orders()
            .once()
            .return_once(|_| Ok(vec![]));

        let response: PartnerOrdersResponse = TestClient::get("http://example.com/partner/orders")
            .send(&make_service(partners))
            .await
            .take_json()
            .await?;

        assert!(response.orders.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_storage_error_returns_500() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners
            .expect_list_orders()
            .once()
            .return_once(|_| Err(PartnersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/partner/orders")
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
