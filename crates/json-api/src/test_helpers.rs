//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use tradepost_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            models::{Address, AddressId, UserId, UserKind},
        },
        baskets::MockBasketsService,
        catalog::{MockCatalogService, models::ProductInfoId},
        orders::{
            MockOrdersService,
            models::{OrderLine, OrderLineId},
        },
        partners::{MockPartnersService, models::ShopId},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: AuthenticatedUser = AuthenticatedUser {
    id: UserId::from_i64(1),
    kind: UserKind::Buyer,
};

pub(crate) const TEST_PARTNER: AuthenticatedUser = AuthenticatedUser {
    id: UserId::from_i64(2),
    kind: UserKind::Shop,
};

pub(crate) fn make_address(id: i64) -> Address {
    Address {
        id: AddressId::from_i64(id),
        user_id: TEST_USER.id,
        city: "Riga".to_string(),
        street: "Brivibas iela".to_string(),
        house: "1".to_string(),
        apartment: "2".to_string(),
    }
}

pub(crate) fn make_line(id: i64, price: u64, quantity: u32) -> OrderLine {
    OrderLine {
        id: OrderLineId::from_i64(id),
        product_info_id: ProductInfoId::from_i64(10),
        product_name: "Sencha".to_string(),
        category_name: "Tea".to_string(),
        shop_id: ShopId::from_i64(1),
        shop_name: "Teaware".to_string(),
        price,
        quantity,
    }
}

#[salvo::handler]
pub(crate) async fn inject_buyer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_partner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_PARTNER);
    ctrl.call_next(req, depot, res).await;
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_register_user().never();
    accounts.expect_create_address().never();
    accounts.expect_list_addresses().never();

    accounts
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_baskets_mock() -> MockBasketsService {
    let mut baskets = MockBasketsService::new();

    baskets.expect_get_basket().never();
    baskets.expect_add_items().never();
    baskets.expect_update_items().never();

    baskets
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_categories().never();
    catalog.expect_list_shops().never();
    catalog.expect_search_offers().never();

    catalog
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders().never();

    orders
}

fn strict_partners_mock() -> MockPartnersService {
    let mut partners = MockPartnersService::new();

    partners.expect_shop_state().never();
    partners.expect_set_shop_state().never();
    partners.expect_update_price_list().never();
    partners.expect_list_delivery_tiers().never();
    partners.expect_set_delivery_tiers().never();
    partners.expect_list_orders().never();

    partners
}

/// An [`AppContext`] whose every service rejects all calls. Tests swap in the
/// one mock they actually exercise via struct update syntax.
pub(crate) fn base_context() -> AppContext {
    AppContext {
        accounts: Arc::new(strict_accounts_mock()),
        auth: Arc::new(strict_auth_mock()),
        baskets: Arc::new(strict_baskets_mock()),
        catalog: Arc::new(strict_catalog_mock()),
        orders: Arc::new(strict_orders_mock()),
        partners: Arc::new(strict_partners_mock()),
    }
}

pub(crate) fn state_with_accounts(accounts: MockAccountsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        accounts: Arc::new(accounts),
        ..base_context()
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(auth),
        ..base_context()
    }))
}

pub(crate) fn state_with_baskets(baskets: MockBasketsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        baskets: Arc::new(baskets),
        ..base_context()
    }))
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        catalog: Arc::new(catalog),
        ..base_context()
    }))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        orders: Arc::new(orders),
        ..base_context()
    }))
}

pub(crate) fn state_with_partners(partners: MockPartnersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        partners: Arc::new(partners),
        ..base_context()
    }))
}

pub(crate) fn accounts_service(accounts: MockAccountsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_accounts(accounts)))
            .hoop(inject_buyer)
            .push(route),
    )
}

pub(crate) fn basket_service(baskets: MockBasketsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_baskets(baskets)))
            .hoop(inject_buyer)
            .push(route),
    )
}

/// Catalog routes are open, so no user is injected.
pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_catalog(catalog)))
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .hoop(inject_buyer)
            .push(route),
    )
}

pub(crate) fn partner_service(partners: MockPartnersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_partners(partners)))
            .hoop(inject_partner)
            .push(route),
    )
}
