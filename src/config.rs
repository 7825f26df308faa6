use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Session validity window in seconds.
    pub token_ttl_secs: i64,
    /// Front-end origins allowed to send the session cookie.
    pub cors_origins: Vec<String>,
    pub payment_gateway_url: String,
    pub payment_gateway_secret: String,
    pub payment_currency: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let jwt_secret = env::var("JWT_SECRET")?;
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(3600);
        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
        );
        let payment_gateway_url = env::var("PAYMENT_GATEWAY_URL")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let payment_gateway_secret = env::var("PAYMENT_GATEWAY_SECRET").unwrap_or_default();
        let payment_currency = env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_secs,
            cors_origins,
            payment_gateway_url,
            payment_gateway_secret,
            payment_currency,
        })
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
