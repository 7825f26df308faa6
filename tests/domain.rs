use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use medshop_api::{
    config::{AppConfig, parse_origins},
    dto::{auth::Claims, cart::QuantityChange, common::UpdateResult, sales::SalesSummary},
    middleware::auth::token_from_cookies,
    models::{ItemState, OrderStatus, Role},
    services::auth_service,
};

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/unused".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        token_ttl_secs: 3600,
        cors_origins: Vec::new(),
        payment_gateway_url: "http://localhost".to_string(),
        payment_gateway_secret: String::new(),
        payment_currency: "usd".to_string(),
    }
}

#[test]
fn issued_session_round_trips() {
    let config = test_config();
    let token = auth_service::issue_session(&config, "a@example.com").unwrap();

    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .unwrap();

    assert_eq!(decoded.claims.sub, "a@example.com");
    assert!(decoded.claims.exp > Utc::now().timestamp() as usize);
}

#[test]
fn expired_session_is_rejected() {
    let config = test_config();
    let claims = Claims {
        sub: "a@example.com".to_string(),
        exp: (Utc::now().timestamp() - 7200) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let result = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    );
    assert!(result.is_err());
}

#[test]
fn foreign_signature_is_rejected() {
    let config = test_config();
    let token = auth_service::issue_session(&config, "a@example.com").unwrap();

    let result = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(b"some-other-secret"),
        &Validation::default(),
    );
    assert!(result.is_err());
}

#[test]
fn token_is_read_from_cookie_header() {
    assert_eq!(token_from_cookies("token=abc"), Some("abc"));
    assert_eq!(
        token_from_cookies("theme=dark; token=abc; lang=en"),
        Some("abc")
    );
    assert_eq!(token_from_cookies("theme=dark"), None);
    assert_eq!(token_from_cookies("token="), None);
}

#[test]
fn session_cookie_attributes() {
    let cookie = auth_service::session_cookie("abc", 3600);
    assert!(cookie.starts_with("token=abc"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));

    assert!(auth_service::clear_session_cookie().contains("Max-Age=0"));
}

#[test]
fn role_serializes_to_stored_form() {
    assert_eq!(
        serde_json::to_value(Role::Admin).unwrap(),
        serde_json::json!("admin")
    );
    let role: Role = serde_json::from_value(serde_json::json!("seller")).unwrap();
    assert_eq!(role, Role::Seller);
    assert_eq!(Role::Customer.as_str(), "customer");
}

#[test]
fn order_status_round_trips() {
    assert_eq!(OrderStatus::parse("pending"), Some(OrderStatus::Pending));
    assert_eq!(OrderStatus::parse("paid"), Some(OrderStatus::Paid));
    assert_eq!(OrderStatus::parse("refunded"), None);
    assert_eq!(OrderStatus::Paid.as_str(), "paid");
}

#[test]
fn item_state_round_trips() {
    assert_eq!(ItemState::parse("pending"), Some(ItemState::Pending));
    assert_eq!(ItemState::parse("sold"), Some(ItemState::Sold));
    assert_eq!(ItemState::parse("shipped"), None);
}

#[test]
fn quantity_change_parses_path_values() {
    let change: QuantityChange = serde_json::from_value(serde_json::json!("increment")).unwrap();
    assert_eq!(change, QuantityChange::Increment);
    let change: QuantityChange = serde_json::from_value(serde_json::json!("decrement")).unwrap();
    assert_eq!(change, QuantityChange::Decrement);
    assert!(serde_json::from_value::<QuantityChange>(serde_json::json!("remove")).is_err());
}

#[test]
fn sales_summary_holds_identity() {
    let summary = SalesSummary::new(300, 200);
    assert_eq!(summary.total_sales, 500);
    assert_eq!(
        summary.total_sales,
        summary.total_paid + summary.total_pending
    );

    let empty = SalesSummary::new(0, 0);
    assert_eq!(empty.total_sales, 0);
}

#[test]
fn update_result_wire_shape() {
    let value = serde_json::to_value(UpdateResult::new(1, 0)).unwrap();
    assert_eq!(value["acknowledged"], serde_json::json!(true));
    assert_eq!(value["matchedCount"], serde_json::json!(1));
    assert_eq!(value["modifiedCount"], serde_json::json!(0));
}

#[test]
fn origins_are_split_and_trimmed() {
    assert_eq!(
        parse_origins("http://a.test, http://b.test ,"),
        vec!["http://a.test", "http://b.test"]
    );
    assert!(parse_origins("").is_empty());
}
