use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::{InsertResult, UpdateResult},
        orders::{CreateOrderRequest, OrderWithItems},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/update-payment-status/{order_id}", patch(update_payment_status))
        .route("/orders", get(list_orders))
        .route("/orders/all", get(list_all_orders))
}

#[utoipa::path(
    post,
    path = "/create-order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order snapshot persisted", body = InsertResult),
        (status = 400, description = "Empty snapshot or total/line-sum mismatch")
    ),
    security(("cookie_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<InsertResult>> {
    let resp = order_service::create_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/update-payment-status/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order marked paid (no-op when already paid)", body = UpdateResult),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown order")
    ),
    security(("cookie_auth" = [])),
    tag = "Orders"
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<UpdateResult>> {
    let resp = order_service::mark_paid(&state, &user, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "The caller's orders, newest first", body = Vec<OrderWithItems>)
    ),
    security(("cookie_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let resp = order_service::list_orders(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/all",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderWithItems>),
        (status = 403, description = "Forbidden")
    ),
    security(("cookie_auth" = [])),
    tag = "Orders"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let resp = order_service::list_all_orders(&state, &user).await?;
    Ok(Json(resp))
}
