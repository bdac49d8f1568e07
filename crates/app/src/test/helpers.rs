//! Test Helpers

use crate::{
    domain::{
        accounts::{
            AccountsService, AccountsServiceError,
            models::{NewAddress, NewUser, User, UserId, UserKind},
        },
        catalog::models::{CategoryId, ProductId, ProductInfoId},
        partners::models::ShopId,
    },
    test::TestContext,
};

pub(crate) fn new_user(email: &str, kind: UserKind) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        company: "Acme".to_string(),
        position: "Owner".to_string(),
        kind,
    }
}

pub(crate) fn new_address() -> NewAddress {
    NewAddress {
        city: "Riga".to_string(),
        street: "Brivibas iela".to_string(),
        house: "1".to_string(),
        apartment: "2".to_string(),
    }
}

pub(crate) async fn register_buyer(
    ctx: &TestContext,
    email: &str,
) -> Result<User, AccountsServiceError> {
    ctx.accounts
        .register_user(new_user(email, UserKind::Buyer))
        .await
}

pub(crate) async fn register_partner(
    ctx: &TestContext,
    email: &str,
) -> Result<User, AccountsServiceError> {
    ctx.accounts
        .register_user(new_user(email, UserKind::Shop))
        .await
}

// Catalog rows normally arrive through the external price-list importer,
// so tests seed them straight into the tables.

pub(crate) async fn seed_shop(ctx: &TestContext, name: &str) -> ShopId {
    seed_shop_with_state(ctx, name, true).await
}

pub(crate) async fn seed_shop_with_state(ctx: &TestContext, name: &str, state: bool) -> ShopId {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO shops (name, state) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(state)
            .fetch_one(ctx.db.pool())
            .await
            .expect("failed to seed shop");

    ShopId::from_i64(id)
}

pub(crate) async fn seed_shop_owned_by(ctx: &TestContext, owner: UserId, name: &str) -> ShopId {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO shops (user_id, name) VALUES ($1, $2) RETURNING id")
            .bind(owner.into_i64())
            .bind(name)
            .fetch_one(ctx.db.pool())
            .await
            .expect("failed to seed shop");

    ShopId::from_i64(id)
}

pub(crate) async fn seed_category(ctx: &TestContext, name: &str) -> CategoryId {
    let id: i64 = sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(ctx.db.pool())
        .await
        .expect("failed to seed category");

    CategoryId::from_i64(id)
}

pub(crate) async fn seed_product(ctx: &TestContext, category: CategoryId, name: &str) -> ProductId {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO products (category_id, name) VALUES ($1, $2) RETURNING id")
            .bind(category.into_i64())
            .bind(name)
            .fetch_one(ctx.db.pool())
            .await
            .expect("failed to seed product");

    ProductId::from_i64(id)
}

pub(crate) async fn seed_offer(
    ctx: &TestContext,
    shop: ShopId,
    product: ProductId,
    price: u64,
    quantity: u32,
) -> ProductInfoId {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO product_infos (product_id, shop_id, price, quantity) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(product.into_i64())
    .bind(shop.into_i64())
    .bind(i64::try_from(price).expect("price fits in BIGINT"))
    .bind(i32::try_from(quantity).expect("quantity fits in INTEGER"))
    .fetch_one(ctx.db.pool())
    .await
    .expect("failed to seed offer");

    ProductInfoId::from_i64(id)
}

pub(crate) async fn seed_tier(ctx: &TestContext, shop: ShopId, min_sum: u64, cost: u64) {
    sqlx::query("INSERT INTO deliveries (shop_id, min_sum, cost) VALUES ($1, $2, $3)")
        .bind(shop.into_i64())
        .bind(i64::try_from(min_sum).expect("min_sum fits in BIGINT"))
        .bind(i64::try_from(cost).expect("cost fits in BIGINT"))
        .execute(ctx.db.pool())
        .await
        .expect("failed to seed delivery tier");
}
