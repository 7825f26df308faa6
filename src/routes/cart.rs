use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        cart::{AddToCartRequest, CartQuery, CartView, QuantityChange},
        common::UpdateResult,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/carts", get(get_cart).post(add_item))
        .route("/carts/change-quantity/{cart_id}/{change}", post(change_quantity))
        .route("/carts/clear/{cart_id}", delete(clear_cart))
}

#[utoipa::path(
    get,
    path = "/carts",
    params(
        ("email" = String, Query, description = "Cart owner; must be the caller's email")
    ),
    responses(
        (status = 200, description = "The owner's cart with product records per line", body = CartView),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No cart yet")
    ),
    security(("cookie_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<CartView>> {
    let resp = cart_service::get_cart(&state.pool, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/carts",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Line added or its quantity incremented", body = UpdateResult),
        (status = 404, description = "Unknown product")
    ),
    security(("cookie_auth" = [])),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<UpdateResult>> {
    let resp = cart_service::add_item(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/carts/change-quantity/{cart_id}/{change}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID"),
        ("change" = String, Path, description = "increment or decrement")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Quantity changed or line removed", body = UpdateResult),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown cart or line")
    ),
    security(("cookie_auth" = [])),
    tag = "Cart"
)]
pub async fn change_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path((cart_id, change)): Path<(Uuid, QuantityChange)>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<UpdateResult>> {
    let resp = cart_service::change_quantity(&state.pool, &user, cart_id, change, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/carts/clear/{cart_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "All lines removed; the cart itself persists", body = UpdateResult),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown cart")
    ),
    security(("cookie_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<UpdateResult>> {
    let resp = cart_service::clear_cart(&state.pool, &user, cart_id).await?;
    Ok(Json(resp))
}
