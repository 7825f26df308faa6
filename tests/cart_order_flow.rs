use medshop_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        cart::{AddToCartRequest, CartQuery, QuantityChange},
        orders::{CreateOrderRequest, NewOrderItem},
        users::{ChangeRoleRequest, SignupRequest, SignupResponse},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{ItemState, OrderStatus, Role},
    payments::PaymentsClient,
    services::{cart_service, order_service, sales_service, user_service},
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

const CUSTOMER: &str = "customer@example.com";
const SELLER: &str = "seller@example.com";
const ADMIN: &str = "admin@example.com";

// Full flow over a real database: signup -> cart -> order fan-out -> mark
// paid -> totals. Skips when no database is configured in the environment.
#[tokio::test]
async fn cart_checkout_and_payment_flow() -> anyhow::Result<()> {
    let state = match setup_state().await? {
        Some(state) => state,
        None => return Ok(()),
    };

    // Seed accounts; signup is idempotent on email.
    for email in [CUSTOMER, SELLER, ADMIN] {
        let resp = user_service::signup(&state.pool, signup_request(email)).await?;
        assert!(matches!(resp, SignupResponse::Created(_)));
    }
    let duplicate = user_service::signup(&state.pool, signup_request(CUSTOMER)).await?;
    match duplicate {
        SignupResponse::AlreadyExists { inserted_id, .. } => assert!(inserted_id.is_none()),
        SignupResponse::Created(_) => panic!("duplicate signup must not insert"),
    }
    assert_eq!(count(&state, "SELECT COUNT(*) FROM users").await?, 3);

    let admin = AuthUser {
        email: ADMIN.to_string(),
        role: Role::Admin,
    };
    for (email, role) in [(SELLER, Role::Seller), (ADMIN, Role::Admin)] {
        user_service::change_role(
            &state.pool,
            &admin,
            ChangeRoleRequest {
                user_email: email.to_string(),
                role,
            },
        )
        .await?;
    }

    let customer = AuthUser {
        email: CUSTOMER.to_string(),
        role: Role::Customer,
    };
    let seller = AuthUser {
        email: SELLER.to_string(),
        role: Role::Seller,
    };

    // Product P at 100 cents.
    let product_id = seed_product(&state, "Napa 500", 100).await?;

    // Adding the same product twice folds into one line at quantity 2.
    cart_service::add_item(&state.pool, &customer, add_request(product_id)).await?;
    cart_service::add_item(&state.pool, &customer, add_request(product_id)).await?;

    let cart = cart_service::get_cart(&state.pool, &customer, cart_query(CUSTOMER)).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(count(&state, "SELECT COUNT(*) FROM carts").await?, 1);

    // Decrement above 1 reduces; decrement at 1 removes the line.
    cart_service::change_quantity(
        &state.pool,
        &customer,
        cart.id,
        QuantityChange::Decrement,
        add_request(product_id),
    )
    .await?;
    cart_service::change_quantity(
        &state.pool,
        &customer,
        cart.id,
        QuantityChange::Decrement,
        add_request(product_id),
    )
    .await?;
    let emptied = cart_service::get_cart(&state.pool, &customer, cart_query(CUSTOMER)).await?;
    assert!(emptied.items.is_empty());

    let missing_line = cart_service::change_quantity(
        &state.pool,
        &customer,
        cart.id,
        QuantityChange::Decrement,
        add_request(product_id),
    )
    .await;
    assert!(matches!(missing_line, Err(AppError::NotFound)));

    // Refill to quantity 2; still one cart, one line.
    cart_service::add_item(&state.pool, &customer, add_request(product_id)).await?;
    cart_service::add_item(&state.pool, &customer, add_request(product_id)).await?;
    assert_eq!(count(&state, "SELECT COUNT(*) FROM carts").await?, 1);

    // A snapshot whose total does not match the line sum is rejected.
    let mismatch = order_service::create_order(
        &state,
        &customer,
        order_request(product_id, 2, 100, 150),
    )
    .await;
    assert!(matches!(mismatch, Err(AppError::BadRequest(_))));

    // Checkout: total 200, status pending, one entry in the seller's ledger.
    let inserted = order_service::create_order(
        &state,
        &customer,
        order_request(product_id, 2, 100, 200),
    )
    .await?;
    let order_id = inserted.inserted_id;

    assert_eq!(
        seller_states(&state).await?,
        vec![ItemState::Pending.as_str().to_string()]
    );

    let pending_totals = sales_service::seller_totals(&state.pool, &seller).await?;
    assert_eq!(pending_totals.total_pending, 200);
    assert_eq!(pending_totals.total_paid, 0);

    let sales = sales_service::total_sales(&state.pool, &admin).await?;
    assert_eq!(sales.total_pending, 200);
    assert_eq!(sales.total_sales, sales.total_paid + sales.total_pending);

    // Admin marks the order paid; the seller's entry moves pending -> sold.
    let paid = order_service::mark_paid(&state, &admin, order_id).await?;
    assert_eq!(paid.modified_count, 1);

    let orders = order_service::list_orders(&state, &customer).await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.status, OrderStatus::Paid);
    assert_eq!(orders[0].items.len(), 1);

    assert_eq!(
        seller_states(&state).await?,
        vec![ItemState::Sold.as_str().to_string()]
    );
    let paid_totals = sales_service::seller_totals(&state.pool, &seller).await?;
    assert_eq!(paid_totals.total_paid, 200);
    assert_eq!(paid_totals.total_pending, 0);

    // Re-applying the transition is an already-satisfied no-op.
    let again = order_service::mark_paid(&state, &admin, order_id).await?;
    assert_eq!(again.modified_count, 0);
    assert_eq!(count(&state, "SELECT COUNT(*) FROM seller_items").await?, 1);

    // A second pending item for the same product transitions independently.
    order_service::create_order(&state, &customer, order_request(product_id, 1, 100, 100))
        .await?;
    let mixed = sales_service::seller_totals(&state.pool, &seller).await?;
    assert_eq!(mixed.total_paid, 200);
    assert_eq!(mixed.total_pending, 100);
    assert_eq!(mixed.total_sales, 300);

    let sales = sales_service::total_sales(&state.pool, &admin).await?;
    assert_eq!(sales.total_sales, sales.total_paid + sales.total_pending);
    assert_eq!(sales.total_sales, 300);

    // Clearing keeps the cart document, empty.
    cart_service::add_item(&state.pool, &customer, add_request(product_id)).await?;
    cart_service::clear_cart(&state.pool, &customer, cart.id).await?;
    let cleared = cart_service::get_cart(&state.pool, &customer, cart_query(CUSTOMER)).await?;
    assert_eq!(cleared.id, cart.id);
    assert!(cleared.items.is_empty());

    // Another account may not read this cart.
    let foreign = cart_service::get_cart(&state.pool, &seller, cart_query(CUSTOMER)).await;
    assert!(matches!(foreign, Err(AppError::Forbidden)));

    Ok(())
}

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
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

    // Clean tables between runs.
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

fn signup_request(email: &str) -> SignupRequest {
    SignupRequest {
        user_email: email.to_string(),
        name: None,
        photo_url: None,
    }
}

fn add_request(product_id: Uuid) -> AddToCartRequest {
    AddToCartRequest { product_id }
}

fn cart_query(email: &str) -> CartQuery {
    CartQuery {
        email: email.to_string(),
    }
}

fn order_request(product_id: Uuid, quantity: i32, unit_price: i64, total: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![NewOrderItem {
            product_id,
            name: "Napa 500".to_string(),
            seller_email: SELLER.to_string(),
            quantity,
            unit_price,
        }],
        total_price: total,
    }
}

async fn seed_product(state: &AppState, name: &str, unit_price: i64) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO products (id, name, generic_name, category, company, unit_price)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind("Paracetamol")
    .bind("Tablet")
    .bind("Beximco Pharma")
    .bind(unit_price)
    .execute(&state.pool)
    .await?;
    Ok(id)
}

async fn count(state: &AppState, sql: &str) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(sql).fetch_one(&state.pool).await?;
    Ok(count)
}

async fn seller_states(state: &AppState) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT state FROM seller_items WHERE seller_email = $1 ORDER BY created_at",
    )
    .bind(SELLER)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows.into_iter().map(|(state,)| state).collect())
}
