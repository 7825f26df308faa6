use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::sales::SalesSummary,
    error::AppResult,
    middleware::auth::AuthUser,
    services::sales_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/total-sales", get(total_sales))
        .route("/seller-total-sales", get(seller_total_sales))
}

#[utoipa::path(
    get,
    path = "/total-sales",
    responses(
        (status = 200, description = "Totals over all orders", body = SalesSummary),
        (status = 403, description = "Forbidden")
    ),
    security(("cookie_auth" = [])),
    tag = "Sales"
)]
pub async fn total_sales(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<SalesSummary>> {
    let resp = sales_service::total_sales(&state.pool, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/seller-total-sales",
    responses(
        (status = 200, description = "Totals over the caller's seller ledger", body = SalesSummary),
        (status = 403, description = "Forbidden")
    ),
    security(("cookie_auth" = [])),
    tag = "Sales"
)]
pub async fn seller_total_sales(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<SalesSummary>> {
    let resp = sales_service::seller_totals(&state.pool, &user).await?;
    Ok(Json(resp))
}
