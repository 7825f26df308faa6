use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::catalog::ProductQuery,
    error::AppResult,
    models::Product,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

#[utoipa::path(
    get,
    path = "/products",
    params(
        ("category" = Option<String>, Query, description = "Exact category name"),
        ("company" = Option<String>, Query, description = "Exact company name"),
        ("q" = Option<String>, Query, description = "Substring match on name or generic name")
    ),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>)
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = catalog_service::list_products(&state.pool, query).await?;
    Ok(Json(products))
}
