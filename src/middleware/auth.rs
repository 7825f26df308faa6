use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{dto::auth::Claims, error::AppError, models::Role, state::AppState};

/// The authenticated caller: email from the verified session token, role
/// resolved from the store. Handlers never read identity from request bodies.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Customer | Role::Seller => Err(AppError::Forbidden),
    }
}

pub fn ensure_seller(user: &AuthUser) -> Result<(), AppError> {
    match user.role {
        Role::Seller => Ok(()),
        Role::Customer | Role::Admin => Err(AppError::Forbidden),
    }
}

pub fn ensure_self(user: &AuthUser, email: &str) -> Result<(), AppError> {
    if user.email == email {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Pull the session token out of a `Cookie` header value.
pub fn token_from_cookies(raw: &str) -> Option<&str> {
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let token = token_from_cookies(cookies).ok_or(AppError::Unauthenticated)?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Forbidden)?;

        let email = decoded.claims.sub;

        // Second-stage check: the role always comes from the store, never the token.
        let role: Option<(Role,)> = sqlx::query_as("SELECT role FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&state.pool)
            .await?;
        let role = role.ok_or(AppError::Forbidden)?.0;

        Ok(AuthUser { email, role })
    }
}
