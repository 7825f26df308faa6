use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub seller_email: String,
    pub quantity: i32,
    /// Unit price in cents.
    pub unit_price: i64,
}

/// The checkout snapshot. `total_price` must equal the line sum; the buyer
/// email comes from the session, never from this body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<NewOrderItem>,
    pub total_price: i64,
}

/// Wire shape of an order: the order fields with its snapshot lines embedded,
/// as the historical order documents were laid out.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
