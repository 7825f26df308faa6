use axum::{
    Json, Router,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    routing::post,
};

use crate::{
    audit::log_audit,
    dto::auth::{SessionResponse, TokenRequest},
    error::AppResult,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/jwt",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Session cookie set", body = SessionResponse)
    ),
    tag = "Auth"
)]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> AppResult<impl IntoResponse> {
    let token = auth_service::issue_session(&state.config, &payload.email)?;
    let cookie = auth_service::session_cookie(&token, state.config.token_ttl_secs);

    if let Err(err) = log_audit(
        &state.pool,
        Some(&payload.email),
        "session_issue",
        Some("users"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SessionResponse { success: true }),
    ))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SessionResponse)
    ),
    tag = "Auth"
)]
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, auth_service::clear_session_cookie())]),
        Json(SessionResponse { success: true }),
    )
}
