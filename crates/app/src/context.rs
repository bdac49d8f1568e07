//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        baskets::{BasketsService, PgBasketsService},
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
        partners::{PartnersService, PgPartnersService},
    },
    notifications::Notifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub auth: Arc<dyn AuthService>,
    pub baskets: Arc<dyn BasketsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub partners: Arc<dyn PartnersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        notifier: Arc<dyn Notifier>,
        admin_email: String,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(
                db.clone(),
                notifier.clone(),
                admin_email.clone(),
            )),
            auth: Arc::new(PgAuthService::new(pool)),
            baskets: Arc::new(PgBasketsService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                notifier.clone(),
                admin_email.clone(),
            )),
            partners: Arc::new(PgPartnersService::new(db, notifier, admin_email)),
        })
    }
}
