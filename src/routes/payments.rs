use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::payments::{CreateIntentRequest, CreateIntentResponse},
    error::{AppError, AppResult},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/create-payment-intent", post(create_payment_intent))
}

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = CreateIntentRequest,
    responses(
        (status = 200, description = "Client secret from the payment gateway", body = CreateIntentResponse),
        (status = 400, description = "Invalid amount")
    ),
    tag = "Payments"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<CreateIntentRequest>,
) -> AppResult<Json<CreateIntentResponse>> {
    if payload.price <= 0 {
        return Err(AppError::BadRequest(
            "price must be greater than 0".to_string(),
        ));
    }

    let client_secret = state.payments.create_intent(payload.price).await?;
    Ok(Json(CreateIntentResponse { client_secret }))
}
