use crate::{
    db::DbPool,
    dto::sales::SalesSummary,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin, ensure_seller},
};

/// Totals over the whole order collection. The paid/pending split partitions
/// every order, so the summary's identity holds for any snapshot.
pub async fn total_sales(pool: &DbPool, user: &AuthUser) -> AppResult<SalesSummary> {
    ensure_admin(user)?;

    let (total_paid, total_pending): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(total_price) FILTER (WHERE status = 'paid'), 0)::BIGINT,
            COALESCE(SUM(total_price) FILTER (WHERE status = 'pending'), 0)::BIGINT
        FROM orders
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(SalesSummary::new(total_paid, total_pending))
}

/// Totals over the caller's seller ledger. An empty ledger contributes zero.
pub async fn seller_totals(pool: &DbPool, user: &AuthUser) -> AppResult<SalesSummary> {
    ensure_seller(user)?;

    let (total_paid, total_pending): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(unit_price * quantity) FILTER (WHERE state = 'sold'), 0)::BIGINT,
            COALESCE(SUM(unit_price * quantity) FILTER (WHERE state = 'pending'), 0)::BIGINT
        FROM seller_items
        WHERE seller_email = $1
        "#,
    )
    .bind(&user.email)
    .fetch_one(pool)
    .await?;

    Ok(SalesSummary::new(total_paid, total_pending))
}
