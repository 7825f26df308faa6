use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::{
        common::UpdateResult,
        users::{ChangeRoleRequest, SignupRequest, SignupResponse},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Role, User},
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(signup).get(list_users))
        .route("/users/change-role", post(change_role))
        .route("/users/{role}/{email}", get(check_role))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Inserted record, or the already-exists marker", body = SignupResponse)
    ),
    tag = "Users"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    let resp = user_service::signup(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All user records", body = Vec<User>),
        (status = 403, description = "Forbidden")
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<User>>> {
    let users = user_service::list_users(&state.pool, &user).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{role}/{email}",
    params(
        ("role" = String, Path, description = "customer, seller or admin"),
        ("email" = String, Path, description = "Account email; must be the caller's")
    ),
    responses(
        (status = 200, description = "Whether the stored role matches, keyed by the requested role"),
        (status = 403, description = "Forbidden")
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
pub async fn check_role(
    State(_state): State<AppState>,
    user: AuthUser,
    Path((role, email)): Path<(Role, String)>,
) -> AppResult<Json<serde_json::Value>> {
    let matches = user_service::check_role(&user, role, &email)?;

    let mut body = serde_json::Map::new();
    body.insert(role.as_str().to_string(), serde_json::Value::Bool(matches));
    Ok(Json(serde_json::Value::Object(body)))
}

#[utoipa::path(
    post,
    path = "/users/change-role",
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UpdateResult),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown user")
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
pub async fn change_role(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangeRoleRequest>,
) -> AppResult<Json<UpdateResult>> {
    let resp = user_service::change_role(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}
