//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tradepost_app::auth::AuthenticatedUser;

const CURRENT_USER_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Stash the authenticated account for downstream handlers.
    fn insert_current_user(&mut self, user: AuthenticatedUser);

    /// The account the auth middleware resolved, or 401 when the route is
    /// reached without one.
    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.insert(CURRENT_USER_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.get::<AuthenticatedUser>(CURRENT_USER_KEY)
            .ok()
            .copied()
            .ok_or_else(StatusError::unauthorized)
    }
}
