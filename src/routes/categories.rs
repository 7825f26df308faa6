use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{catalog::CategoryWithProducts, common::UpdateResult},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Category,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/rebuild", post(rebuild_categories))
        .route("/categories/{id}", get(get_category))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = catalog_service::list_categories(&state.pool).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category with its resolved products", body = CategoryWithProducts),
        (status = 404, description = "Category not found")
    ),
    tag = "Catalog"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CategoryWithProducts>> {
    let resp = catalog_service::get_category(&state.pool, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/categories/rebuild",
    responses(
        (status = 200, description = "Denormalized product lists recomputed", body = UpdateResult),
        (status = 403, description = "Forbidden")
    ),
    security(("cookie_auth" = [])),
    tag = "Catalog"
)]
pub async fn rebuild_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UpdateResult>> {
    let resp = catalog_service::rebuild_categories(&state.pool, &user).await?;
    Ok(Json(resp))
}
