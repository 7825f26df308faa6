use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use medshop_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    payments::PaymentsClient,
    routes::create_api_router,
    services::{auth_service, user_service},
    state::AppState,
};
use medshop_api::dto::users::SignupRequest;
use sea_orm::{ConnectionTrait, Statement};
use tower::ServiceExt;

const OWNER: &str = "owner@example.com";
const OTHER: &str = "other@example.com";

// The session gate over the real router: no cookie -> 401, bad token -> 403,
// valid session for somebody else's cart -> 403.
#[tokio::test]
async fn cart_requests_pass_through_the_identity_gate() -> anyhow::Result<()> {
    let state = match setup_state().await? {
        Some(state) => state,
        None => return Ok(()),
    };

    for email in [OWNER, OTHER] {
        user_service::signup(
            &state.pool,
            SignupRequest {
                user_email: email.to_string(),
                name: None,
                photo_url: None,
            },
        )
        .await?;
    }

    let app = create_api_router().with_state(state.clone());

    // Missing credential.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/carts?email={OWNER}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Invalid signature.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/carts?email={OWNER}"))
                .header(header::COOKIE, "token=not-a-token")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Valid session, wrong owner.
    let token = auth_service::issue_session(&state.config, OTHER)?;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/carts?email={OWNER}"))
                .header(header::COOKIE, format!("token={token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE seller_items, order_items, orders, cart_items, carts, audit_logs, products, categories, users CASCADE",
    ))
    .await?;

    let config = AppConfig {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_secs: 3600,
        cors_origins: Vec::new(),
        payment_gateway_url: "http://localhost:1".to_string(),
        payment_gateway_secret: String::new(),
        payment_currency: "usd".to_string(),
    };
    let payments = PaymentsClient::new(&config);

    Ok(Some(AppState {
        pool,
        orm,
        config,
        payments,
    }))
}
