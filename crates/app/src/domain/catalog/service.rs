//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Category, OfferFilter, ProductOffer, ShopSummary},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn list_shops(&self) -> Result<Vec<ShopSummary>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let shops = self.repository.list_shops(&mut tx).await?;

        tx.commit().await?;

        Ok(shops)
    }

    async fn search_offers(
        &self,
        filter: OfferFilter,
    ) -> Result<Vec<ProductOffer>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offers = self.repository.search_offers(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(offers)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All product categories.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    /// Shops that are currently accepting orders.
    async fn list_shops(&self) -> Result<Vec<ShopSummary>, CatalogServiceError>;

    /// Offers from active shops matching the filter, with product, category
    /// and shop display data joined in.
    async fn search_offers(
        &self,
        filter: OfferFilter,
    ) -> Result<Vec<ProductOffer>, CatalogServiceError>;
}
