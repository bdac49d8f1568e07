//! App Router

use salvo::Router;

use crate::{accounts, auth, basket, catalog, orders, partner};

/// The API surface. Registration and catalog reads are open; everything else
/// sits behind the bearer-token hoop, and the partner subtree additionally
/// requires a shop account.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("users/register").post(accounts::register::handler))
        .push(Router::with_path("categories").get(catalog::categories::handler))
        .push(Router::with_path("shops").get(catalog::shops::handler))
        .push(Router::with_path("products").get(catalog::products::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("basket").get(basket::get::handler).push(
                        Router::with_path("items")
                            .post(basket::add_items::handler)
                            .put(basket::update_items::handler),
                    ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler),
                )
                .push(
                    Router::with_path("addresses")
                        .get(accounts::list_addresses::handler)
                        .post(accounts::create_address::handler),
                )
                .push(
                    Router::with_path("partner")
                        .hoop(auth::middleware::require_partner)
                        .push(
                            Router::with_path("state")
                                .get(partner::get_state::handler)
                                .post(partner::set_state::handler),
                        )
                        .push(
                            Router::with_path("pricelist")
                                .post(partner::update_price_list::handler),
                        )
                        .push(
                            Router::with_path("delivery")
                                .get(partner::list_delivery::handler)
                                .put(partner::set_delivery::handler),
                        )
                        .push(Router::with_path("orders").get(partner::orders::handler)),
                ),
        )
}
