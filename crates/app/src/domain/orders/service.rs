//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::{AddressId, UserId},
        baskets::repositories::PgBasketsRepository,
        delivery::{repository::PgDeliveryRepository, resolve_delivery},
        orders::{
            errors::OrdersServiceError,
            models::{OrderLine, OrderState, OrderSummary, PlacedOrder, ShopIneligibility},
            repository::PgOrdersRepository,
        },
        partners::models::ShopId,
    },
    notifications::{Notification, Notifier},
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    baskets_repository: PgBasketsRepository,
    orders_repository: PgOrdersRepository,
    delivery_repository: PgDeliveryRepository,
    notifier: Arc<dyn Notifier>,
    admin_email: String,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>, admin_email: String) -> Self {
        Self {
            db,
            baskets_repository: PgBasketsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            delivery_repository: PgDeliveryRepository::new(),
            notifier,
            admin_email,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserId,
        address: AddressId,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Locking the basket row pins the line set for the rest of the
        // transaction; a concurrent add or update waits until we commit.
        let order = self
            .baskets_repository
            .find_basket_for_update(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::NoBasket)?;

        let subtotals = self
            .orders_repository
            .shop_subtotals(&mut tx, order)
            .await?;

        let shops: Vec<ShopId> = subtotals.iter().map(|shop| shop.shop_id).collect();

        let tiers = self
            .delivery_repository
            .tiers_for_shops(&mut tx, &shops)
            .await?;

        // Sweep every shop before giving up, so one response names them all.
        let mut ineligible = Vec::new();

        for shop in &subtotals {
            let shop_tiers = tiers
                .get(&shop.shop_id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            if let Err(reason) = resolve_delivery(shop_tiers, shop.subtotal) {
                ineligible.push(ShopIneligibility {
                    shop_name: shop.shop_name.clone(),
                    reason,
                });
            }
        }

        if !ineligible.is_empty() {
            return Err(OrdersServiceError::DeliveryIneligible(ineligible));
        }

        self.orders_repository
            .place_order(&mut tx, order, address)
            .await?;

        let buyer = self.orders_repository.buyer_contact(&mut tx, user).await?;

        tx.commit().await?;

        let placed = PlacedOrder {
            id: order,
            state: OrderState::New,
        };

        // Committed; from here on nothing may fail the caller.
        self.notifier.notify(Notification {
            title: format!("Order {} status update", placed.id),
            body: format!("Order {} is now {}.", placed.id, placed.state),
            recipients: vec![buyer.email],
        });

        self.notifier.notify(Notification {
            title: format!("New order from {} {}", buyer.first_name, buyer.last_name),
            body: format!(
                "{} {} placed new order {}.",
                buyer.first_name, buyer.last_name, placed.id
            ),
            recipients: vec![self.admin_email.clone()],
        });

        Ok(placed)
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, user).await?;

        let ids: Vec<_> = orders.iter().map(|order| order.id).collect();

        let mut lines = self
            .orders_repository
            .lines_for_orders(&mut tx, &ids)
            .await?;

        tx.commit().await?;

        for order in &mut orders {
            let items = lines.remove(&order.id).unwrap_or_default();

            order.total_sum = items.iter().map(OrderLine::line_total).sum();
            order.items = items;
        }

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's basket into a placed order delivered to `address`.
    ///
    /// Every shop in the basket must pass the delivery eligibility sweep;
    /// otherwise the full list of failing shops is returned and nothing is
    /// mutated. On success the buyer and the platform admin are notified
    /// out-of-band.
    async fn place_order(
        &self,
        user: UserId,
        address: AddressId,
    ) -> Result<PlacedOrder, OrdersServiceError>;

    /// The user's placed (non-basket) orders, newest first, with lines,
    /// delivery address and goods totals.
    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderSummary>, OrdersServiceError>;
}
