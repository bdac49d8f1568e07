//! Catalog Models

use crate::{domain::partners::models::ShopId, ids::TypedId};

/// Category ID
pub type CategoryId = TypedId<Category>;

/// Product ID
pub type ProductId = TypedId<Product>;

/// Product Info ID
pub type ProductInfoId = TypedId<ProductInfo>;

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Product
pub struct Product;

/// Product Info: one shop's priced offer of a product. Basket lines and
/// order lines reference these, never bare products.
pub struct ProductInfo;

/// Public shop listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSummary {
    pub id: ShopId,
    pub name: String,
    pub state: bool,
}

/// A searchable offer with its product, category and shop context.
#[derive(Debug, Clone)]
pub struct ProductOffer {
    pub id: ProductInfoId,
    pub product_id: ProductId,
    pub product_name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub price: u64,
    pub quantity: u32,
}

/// Offer search filter; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferFilter {
    pub shop: Option<ShopId>,
    pub category: Option<CategoryId>,
}
