//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::catalog::models::Category;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The category id
    pub id: i64,

    /// The category name
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_i64(),
            name: category.name,
        }
    }
}

/// Categories Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// The list of categories, sorted by name
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Returns all product categories.
#[endpoint(tags("catalog"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
