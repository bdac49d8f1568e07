//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use tradepost_app::{auth::AuthServiceError, domain::accounts::models::UserKind};

use crate::{extensions::*, state::State};

/// Resolves the bearer token to an account and stores it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let user = match state.app.auth.authenticate_bearer(token).await {
        Ok(user) => user,
        Err(AuthServiceError::NotFound | AuthServiceError::UserNotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid API token"));

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_current_user(user);

    ctrl.call_next(req, depot, res).await;
}

/// Rejects callers whose account is not a partner account. Runs after
/// [`handler`] on the partner subtree.
#[salvo::handler]
pub(crate) async fn require_partner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.current_user_or_401() {
        Ok(user) if user.kind == UserKind::Shop => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_other) => {
            res.render(StatusError::forbidden().brief("Partner account required"));
        }
        Err(status_error) => {
            res.render(status_error);
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use tradepost_app::auth::MockAuthService;

    use crate::test_helpers::{
        TEST_PARTNER, TEST_USER, inject_buyer, inject_partner, state_with_auth,
    };

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .current_user_or_401()
            .ok()
            .map_or_else(|| "missing".to_string(), |user| user.id.to_string());

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = state_with_auth(auth);

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_current_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(TEST_USER));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_USER.id.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_partner_gate_rejects_buyers_with_403() -> TestResult {
        let router = Router::new()
            .hoop(inject_buyer)
            .hoop(require_partner)
            .push(Router::new().get(echo_user));

        let res = TestClient::get("http://example.com")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_partner_gate_admits_partners() -> TestResult {
        let router = Router::new()
            .hoop(inject_partner)
            .hoop(require_partner)
            .push(Router::new().get(echo_user));

        let mut res = TestClient::get("http://example.com")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_PARTNER.id.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_partner_gate_without_authentication_returns_401() -> TestResult {
        let router = Router::new()
            .hoop(require_partner)
            .push(Router::new().get(echo_user));

        let res = TestClient::get("http://example.com")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
