//! Catalog service errors.

use sqlx::Error;
use thiserror::Error;

/// The catalog surface is read-only, so storage trouble is the only way it
/// can fail.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("storage error")]
    Sql(#[from] Error),
}
