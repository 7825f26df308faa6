use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub company: Option<String>,
    /// Substring match on name or generic name.
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}
