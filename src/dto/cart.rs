use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// The historical clients send the product id as `_id`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[serde(rename = "_id")]
    pub product_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartQuery {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_email: String,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuantityChange {
    Increment,
    Decrement,
}
