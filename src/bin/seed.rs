use medshop_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    ensure_user(&pool, "admin@medshop.example", "admin").await?;
    ensure_user(&pool, "seller@medshop.example", "seller").await?;
    ensure_user(&pool, "customer@medshop.example", "customer").await?;

    seed_catalog(&pool).await?;
    rebuild_categories(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, email: &str, role: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (email, role)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        "#,
    )
    .bind(email)
    .bind(role)
    .execute(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(())
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for name in ["Tablet", "Capsule", "Syrup", "Injection"] {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(pool)
            .await?;
    }

    // Prices are in cents.
    let products = vec![
        ("Napa 500", Some("Paracetamol"), "Tablet", "Beximco Pharma", 120_i64),
        ("Seclo 20", Some("Omeprazole"), "Capsule", "Square Pharma", 650),
        ("Tusca Plus", Some("Dextromethorphan"), "Syrup", "Square Pharma", 9500),
        ("Maxpro 20", Some("Esomeprazole"), "Capsule", "Renata", 800),
        ("Insulin N", Some("Insulin NPH"), "Injection", "Novo Nordisk", 55000),
    ];

    for (name, generic_name, category, company, unit_price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, generic_name, category, company, unit_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(generic_name)
        .bind(category)
        .bind(company)
        .bind(unit_price)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}

async fn rebuild_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE categories c
        SET product_ids = COALESCE(
            (SELECT array_agg(p.id ORDER BY p.name) FROM products p WHERE p.category = c.name),
            '{}'
        )
        "#,
    )
    .execute(pool)
    .await?;

    println!("Rebuilt category product lists");
    Ok(())
}
