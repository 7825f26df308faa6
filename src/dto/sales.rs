use serde::Serialize;
use utoipa::ToSchema;

/// `total_sales == total_paid + total_pending` by construction.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: i64,
    pub total_paid: i64,
    pub total_pending: i64,
}

impl SalesSummary {
    pub fn new(total_paid: i64, total_pending: i64) -> Self {
        Self {
            total_sales: total_paid + total_pending,
            total_paid,
            total_pending,
        }
    }
}
