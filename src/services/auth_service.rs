use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    config::AppConfig,
    dto::auth::Claims,
    error::{AppError, AppResult},
};

/// Sign a session token for the supplied identity claims. The gate signs
/// whatever email it is handed; authorization happens per request against the
/// stored role.
pub fn issue_session(config: &AppConfig, email: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::seconds(config.token_ttl_secs))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("failed to compute token expiry")))?;

    let claims = Claims {
        sub: email.to_string(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(token)
}

/// `Set-Cookie` value carrying the session token.
pub fn session_cookie(token: &str, ttl_secs: i64) -> String {
    format!("token={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={ttl_secs}")
}

/// `Set-Cookie` value that clears the session.
pub fn clear_session_cookie() -> String {
    "token=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0".to_string()
}
