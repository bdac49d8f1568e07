//! Baskets service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::UserId,
        baskets::{
            errors::BasketsServiceError,
            models::{Basket, BasketItemChange, BasketUpdate, NewBasketItem},
            repositories::{PgBasketItemsRepository, PgBasketsRepository},
        },
        orders::models::{OrderLine, OrderLineId},
    },
};

#[derive(Debug, Clone)]
pub struct PgBasketsService {
    db: Db,
    baskets_repository: PgBasketsRepository,
    items_repository: PgBasketItemsRepository,
}

impl PgBasketsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            baskets_repository: PgBasketsRepository::new(),
            items_repository: PgBasketItemsRepository::new(),
        }
    }
}

#[async_trait]
impl BasketsService for PgBasketsService {
    async fn get_basket(&self, user: UserId) -> Result<Option<Basket>, BasketsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(mut basket) = self.baskets_repository.find_basket(&mut tx, user).await? else {
            return Ok(None);
        };

        let items = self
            .items_repository
            .basket_lines(&mut tx, basket.id)
            .await?;

        tx.commit().await?;

        basket.total_sum = items.iter().map(OrderLine::line_total).sum();
        basket.items = items;

        Ok(Some(basket))
    }

    async fn add_items(
        &self,
        user: UserId,
        items: Vec<NewBasketItem>,
    ) -> Result<u64, BasketsServiceError> {
        if items.is_empty() {
            return Err(BasketsServiceError::EmptyItems);
        }

        if items.iter().any(|item| item.quantity == 0) {
            return Err(BasketsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .baskets_repository
            .get_or_create_basket(&mut tx, user)
            .await?;

        // One transaction for the whole batch: the first bad item rolls
        // everything back, including the basket row if it was just created.
        for item in &items {
            self.items_repository
                .create_item(&mut tx, order, *item)
                .await?;
        }

        tx.commit().await?;

        Ok(items.len() as u64)
    }

    async fn update_items(
        &self,
        user: UserId,
        changes: Vec<BasketItemChange>,
    ) -> Result<BasketUpdate, BasketsServiceError> {
        if changes.is_empty() {
            return Err(BasketsServiceError::EmptyItems);
        }

        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .baskets_repository
            .find_basket_for_update(&mut tx, user)
            .await?
            .ok_or(BasketsServiceError::NoBasket)?;

        let mut updated = 0;
        let mut to_delete: Vec<OrderLineId> = Vec::new();

        for change in &changes {
            if change.quantity == 0 {
                to_delete.push(change.item);
            } else {
                updated += self
                    .items_repository
                    .update_quantity(&mut tx, order, change.item, change.quantity)
                    .await?;
            }
        }

        // Deletions execute as one batch after all quantity updates.
        let deleted = if to_delete.is_empty() {
            0
        } else {
            self.items_repository
                .delete_items(&mut tx, order, &to_delete)
                .await?
        };

        if updated == 0 && deleted == 0 {
            return Err(BasketsServiceError::NoMatchingItems);
        }

        tx.commit().await?;

        Ok(BasketUpdate { updated, deleted })
    }
}

#[automock]
#[async_trait]
pub trait BasketsService: Send + Sync {
    /// The user's open basket with display lines and goods total, or `None`
    /// when the user has no basket. Never creates one.
    async fn get_basket(&self, user: UserId) -> Result<Option<Basket>, BasketsServiceError>;

    /// Add lines to the basket, creating the basket on first use. The batch
    /// is all-or-nothing; on success the count of created lines is returned.
    async fn add_items(
        &self,
        user: UserId,
        items: Vec<NewBasketItem>,
    ) -> Result<u64, BasketsServiceError>;

    /// Change line quantities; quantity `0` deletes the line. Lines outside
    /// the user's basket are silently left untouched, and a call that
    /// matches nothing at all fails.
    async fn update_items(
        &self,
        user: UserId,
        changes: Vec<BasketItemChange>,
    ) -> Result<BasketUpdate, BasketsServiceError>;
}
