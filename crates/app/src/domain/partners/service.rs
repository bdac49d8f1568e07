//! Partners service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::UserId,
        delivery::{models::DeliveryTier, repository::PgDeliveryRepository},
        orders::models::OrderLine,
        partners::{
            errors::PartnersServiceError,
            models::{PartnerOrder, Shop},
            repository::PgPartnersRepository,
        },
    },
    notifications::{Notification, Notifier},
};

/// Display name given to shops created through the price-list flow, until
/// the first ingested list names them properly.
pub const PLACEHOLDER_SHOP_NAME: &str = "- price list pending -";

#[derive(Clone)]
pub struct PgPartnersService {
    db: Db,
    repository: PgPartnersRepository,
    delivery_repository: PgDeliveryRepository,
    notifier: Arc<dyn Notifier>,
    admin_email: String,
}

impl PgPartnersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>, admin_email: String) -> Self {
        Self {
            db,
            repository: PgPartnersRepository::new(),
            delivery_repository: PgDeliveryRepository::new(),
            notifier,
            admin_email,
        }
    }
}

#[async_trait]
impl PartnersService for PgPartnersService {
    async fn shop_state(&self, partner: UserId) -> Result<Shop, PartnersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let shop = self
            .repository
            .find_shop_by_owner(&mut tx, partner)
            .await?
            .ok_or(PartnersServiceError::NoShop)?;

        tx.commit().await?;

        Ok(shop)
    }

    async fn set_shop_state(
        &self,
        partner: UserId,
        state: bool,
    ) -> Result<(), PartnersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .set_shop_state(&mut tx, partner, state)
            .await?;

        if updated == 0 {
            return Err(PartnersServiceError::NoShop);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn update_price_list(
        &self,
        partner: UserId,
        url: String,
    ) -> Result<Shop, PartnersServiceError> {
        if !url_is_valid(&url) {
            return Err(PartnersServiceError::InvalidUrl);
        }

        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .ensure_shop(&mut tx, partner, PLACEHOLDER_SHOP_NAME)
            .await?;

        let shop = self
            .repository
            .announce_price_list(&mut tx, partner, &url)
            .await?;

        tx.commit().await?;

        self.notifier.notify(Notification {
            title: format!("{}: price list update", shop.name),
            body: format!("Shop {} announced a new price list at {url}.", shop.name),
            recipients: vec![self.admin_email.clone()],
        });

        Ok(shop)
    }

    async fn list_delivery_tiers(
        &self,
        partner: UserId,
    ) -> Result<Vec<DeliveryTier>, PartnersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let shop = self
            .repository
            .find_shop_by_owner(&mut tx, partner)
            .await?
            .ok_or(PartnersServiceError::NoShop)?;

        let tiers = self.delivery_repository.list_tiers(&mut tx, shop.id).await?;

        tx.commit().await?;

        Ok(tiers)
    }

    async fn set_delivery_tiers(
        &self,
        partner: UserId,
        tiers: Vec<DeliveryTier>,
    ) -> Result<(), PartnersServiceError> {
        if tiers.is_empty() {
            return Err(PartnersServiceError::EmptyTiers);
        }

        let mut tx = self.db.begin_transaction().await?;

        let shop = self
            .repository
            .find_shop_by_owner(&mut tx, partner)
            .await?
            .ok_or(PartnersServiceError::NoShop)?;

        // The whole batch lands or none of it does.
        for tier in tiers {
            self.delivery_repository
                .upsert_tier(&mut tx, shop.id, tier)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_orders(
        &self,
        partner: UserId,
    ) -> Result<Vec<PartnerOrder>, PartnersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let shop = self
            .repository
            .find_shop_by_owner(&mut tx, partner)
            .await?
            .ok_or(PartnersServiceError::NoShop)?;

        let mut orders = self.repository.partner_orders(&mut tx, shop.id).await?;

        let ids: Vec<_> = orders.iter().map(|order| order.id).collect();

        let mut lines = self
            .repository
            .shop_order_lines(&mut tx, &ids, shop.id)
            .await?;

        tx.commit().await?;

        for order in &mut orders {
            let items = lines.remove(&order.id).unwrap_or_default();

            order.subtotal = items.iter().map(OrderLine::line_total).sum();
            order.items = items;
        }

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait PartnersService: Send + Sync {
    /// The partner's shop, including order-acceptance state and price-list
    /// source metadata.
    async fn shop_state(&self, partner: UserId) -> Result<Shop, PartnersServiceError>;

    /// Switch the partner's shop in or out of order acceptance.
    async fn set_shop_state(
        &self,
        partner: UserId,
        state: bool,
    ) -> Result<(), PartnersServiceError>;

    /// Announce a new price list by URL, creating the shop on first use.
    /// Ingestion happens elsewhere; this records the source and tells the
    /// platform admin.
    async fn update_price_list(
        &self,
        partner: UserId,
        url: String,
    ) -> Result<Shop, PartnersServiceError>;

    /// The shop's delivery price list, cheapest threshold first.
    async fn list_delivery_tiers(
        &self,
        partner: UserId,
    ) -> Result<Vec<DeliveryTier>, PartnersServiceError>;

    /// Upsert delivery tiers keyed by `min_sum`. Existing thresholds get the
    /// new cost; new thresholds are added.
    async fn set_delivery_tiers(
        &self,
        partner: UserId,
        tiers: Vec<DeliveryTier>,
    ) -> Result<(), PartnersServiceError>;

    /// Placed orders containing the shop's goods, restricted to the lines
    /// this shop supplies, with buyer contact and delivery address.
    async fn list_orders(&self, partner: UserId) -> Result<Vec<PartnerOrder>, PartnersServiceError>;
}

/// Accept `http`/`https` URLs with a non-empty host. Reachability is the
/// ingestion job's problem.
fn url_is_valid(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");

    !host.is_empty() && !host.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            accounts::AccountsService,
            baskets::{BasketsService, models::NewBasketItem},
            orders::{OrdersService, models::OrderState},
        },
        test::{
            TestContext,
            helpers::{
                new_address, register_buyer, register_partner, seed_category, seed_offer,
                seed_product, seed_shop_owned_by, seed_tier,
            },
        },
    };

    use super::*;

    #[test]
    fn url_shape_check_accepts_http_and_https() {
        assert!(url_is_valid("https://shop.example.com/price.yaml"));
        assert!(url_is_valid("http://shop.example.com"));
        assert!(url_is_valid("https://shop.example.com?fmt=yaml"));
    }

    #[test]
    fn url_shape_check_rejects_malformed_urls() {
        assert!(!url_is_valid(""), "empty");
        assert!(!url_is_valid("shop.example.com/price.yaml"), "no scheme");
        assert!(!url_is_valid("ftp://shop.example.com"), "other scheme");
        assert!(!url_is_valid("https://"), "empty host");
        assert!(!url_is_valid("https://bad host/x"), "whitespace in host");
    }

    #[tokio::test]
    async fn shop_state_requires_a_shop() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        let result = ctx.partners.shop_state(partner.id).await;

        assert!(
            matches!(result, Err(PartnersServiceError::NoShop)),
            "expected NoShop, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_price_list_creates_shop_with_placeholder_name() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        let shop = ctx
            .partners
            .update_price_list(partner.id, "https://shop.example.com/price.yaml".to_string())
            .await?;

        assert_eq!(shop.name, PLACEHOLDER_SHOP_NAME);
        assert_eq!(shop.user_id, Some(partner.id));
        assert_eq!(
            shop.price_list_url.as_deref(),
            Some("https://shop.example.com/price.yaml")
        );
        assert!(shop.price_list_announced_at.is_some());
        assert!(!shop.price_list_fresh, "announced lists start stale");

        Ok(())
    }

    #[tokio::test]
    async fn update_price_list_notifies_the_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        ctx.partners
            .update_price_list(partner.id, "https://shop.example.com/price.yaml".to_string())
            .await?;

        let sent = ctx.sent_notifications();

        assert!(
            sent.iter().any(|n| {
                n.recipients == vec![ctx.admin_email.clone()]
                    && n.title.contains("price list update")
            }),
            "expected an admin notification, got {sent:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_price_list_rejects_malformed_url() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        let result = ctx
            .partners
            .update_price_list(partner.id, "not a url".to_string())
            .await;

        assert!(
            matches!(result, Err(PartnersServiceError::InvalidUrl)),
            "expected InvalidUrl, got {result:?}"
        );

        // Validation failed before the get-or-create ran.
        assert!(matches!(
            ctx.partners.shop_state(partner.id).await,
            Err(PartnersServiceError::NoShop)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn update_price_list_keeps_an_existing_shop_name() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        seed_shop_owned_by(&ctx, partner.id, "Teaware").await;

        let shop = ctx
            .partners
            .update_price_list(partner.id, "https://teaware.example.com/v2.yaml".to_string())
            .await?;

        assert_eq!(shop.name, "Teaware");
        assert_eq!(
            shop.price_list_url.as_deref(),
            Some("https://teaware.example.com/v2.yaml")
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_shop_state_flips_order_acceptance() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        seed_shop_owned_by(&ctx, partner.id, "Teaware").await;

        ctx.partners.set_shop_state(partner.id, false).await?;

        assert!(!ctx.partners.shop_state(partner.id).await?.state);

        ctx.partners.set_shop_state(partner.id, true).await?;

        assert!(ctx.partners.shop_state(partner.id).await?.state);

        Ok(())
    }

    #[tokio::test]
    async fn set_shop_state_requires_a_shop() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        let result = ctx.partners.set_shop_state(partner.id, false).await;

        assert!(
            matches!(result, Err(PartnersServiceError::NoShop)),
            "expected NoShop, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_delivery_tiers_rejects_empty_batch() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        let result = ctx.partners.set_delivery_tiers(partner.id, Vec::new()).await;

        assert!(
            matches!(result, Err(PartnersServiceError::EmptyTiers)),
            "expected EmptyTiers, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_delivery_tiers_upserts_the_whole_batch() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "shop@example.com").await?;

        seed_shop_owned_by(&ctx, partner.id, "Teaware").await;

        ctx.partners
            .set_delivery_tiers(
                partner.id,
                vec![
                    DeliveryTier {
                        min_sum: 0,
                        cost: 5_00,
                    },
                    DeliveryTier {
                        min_sum: 100_00,
                        cost: 3_00,
                    },
                ],
            )
            .await?;

        // Second batch: one changed cost, one new threshold.
        ctx.partners
            .set_delivery_tiers(
                partner.id,
                vec![
                    DeliveryTier {
                        min_sum: 100_00,
                        cost: 2_00,
                    },
                    DeliveryTier {
                        min_sum: 500_00,
                        cost: 1_00,
                    },
                ],
            )
            .await?;

        assert_eq!(
            ctx.partners.list_delivery_tiers(partner.id).await?,
            vec![
                DeliveryTier {
                    min_sum: 0,
                    cost: 5_00,
                },
                DeliveryTier {
                    min_sum: 100_00,
                    cost: 2_00,
                },
                DeliveryTier {
                    min_sum: 500_00,
                    cost: 1_00,
                },
            ],
            "tiers come back ascending by threshold"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_restricts_lines_to_the_partners_shop() -> TestResult {
        let ctx = TestContext::new().await;

        let tea_partner = register_partner(&ctx, "tea@example.com").await?;
        let grocer_partner = register_partner(&ctx, "grocer@example.com").await?;
        let teaware = seed_shop_owned_by(&ctx, tea_partner.id, "Teaware").await;
        let grocer = seed_shop_owned_by(&ctx, grocer_partner.id, "Grocer").await;

        seed_tier(&ctx, teaware, 0, 3_00).await;
        seed_tier(&ctx, grocer, 0, 2_00).await;

        let category = seed_category(&ctx, "Sundries").await;
        let kettle = seed_product(&ctx, category, "Kettle").await;
        let flour = seed_product(&ctx, category, "Flour").await;
        let kettle_offer = seed_offer(&ctx, teaware, kettle, 12_00, 50).await;
        let flour_offer = seed_offer(&ctx, grocer, flour, 5_00, 50).await;

        let buyer = register_buyer(&ctx, "buyer@example.com").await?;
        let address = ctx.accounts.create_address(buyer.id, new_address()).await?;

        ctx.baskets
            .add_items(
                buyer.id,
                vec![
                    NewBasketItem {
                        product_info: kettle_offer,
                        quantity: 2,
                    },
                    NewBasketItem {
                        product_info: flour_offer,
                        quantity: 3,
                    },
                ],
            )
            .await?;

        let placed = ctx.orders.place_order(buyer.id, address.id).await?;

        let orders = ctx.partners.list_orders(tea_partner.id).await?;

        assert_eq!(orders.len(), 1);

        let order = &orders[0];

        assert_eq!(order.id, placed.id);
        assert_eq!(order.state, OrderState::New);
        assert_eq!(order.buyer_email, "buyer@example.com");
        assert_eq!(order.address.as_ref().map(|a| a.id), Some(address.id));
        assert_eq!(order.items.len(), 1, "only this shop's lines");
        assert_eq!(order.items[0].product_name, "Kettle");
        assert_eq!(order.subtotal, 2 * 12_00, "subtotal covers only this shop");

        let other = ctx.partners.list_orders(grocer_partner.id).await?;

        assert_eq!(other.len(), 1);
        assert_eq!(other[0].items[0].product_name, "Flour");
        assert_eq!(other[0].subtotal, 3 * 5_00);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_skips_unplaced_baskets() -> TestResult {
        let ctx = TestContext::new().await;

        let partner = register_partner(&ctx, "tea@example.com").await?;
        let teaware = seed_shop_owned_by(&ctx, partner.id, "Teaware").await;

        let category = seed_category(&ctx, "Kettles").await;
        let kettle = seed_product(&ctx, category, "Kettle").await;
        let offer = seed_offer(&ctx, teaware, kettle, 12_00, 50).await;

        let buyer = register_buyer(&ctx, "buyer@example.com").await?;

        ctx.baskets
            .add_items(
                buyer.id,
                vec![NewBasketItem {
                    product_info: offer,
                    quantity: 1,
                }],
            )
            .await?;

        assert!(ctx.partners.list_orders(partner.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_empty_without_sales() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = register_partner(&ctx, "tea@example.com").await?;

        seed_shop_owned_by(&ctx, partner.id, "Teaware").await;

        assert!(ctx.partners.list_orders(partner.id).await?.is_empty());

        Ok(())
    }
}
