use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::{
        catalog::{CategoryWithProducts, ProductQuery},
        common::UpdateResult,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Product},
};

pub async fn list_products(pool: &DbPool, query: ProductQuery) -> AppResult<Vec<Product>> {
    let mut builder = QueryBuilder::<sqlx::Postgres>::new("SELECT * FROM products WHERE 1 = 1");

    if let Some(category) = &query.category {
        builder.push(" AND category = ").push_bind(category);
    }
    if let Some(company) = &query.company {
        builder.push(" AND company = ").push_bind(company);
    }
    if let Some(q) = &query.q {
        let pattern = format!("%{q}%");
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR generic_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    builder.push(" ORDER BY name");

    let products = builder.build_query_as::<Product>().fetch_all(pool).await?;
    Ok(products)
}

pub async fn list_categories(pool: &DbPool) -> AppResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

/// Resolve a category and the products behind its denormalized id list.
pub async fn get_category(pool: &DbPool, id: Uuid) -> AppResult<CategoryWithProducts> {
    let category: Option<Category> = sqlx::query_as("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let category = category.ok_or(AppError::NotFound)?;

    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1) ORDER BY name")
            .bind(&category.product_ids)
            .fetch_all(pool)
            .await?;

    Ok(CategoryWithProducts { category, products })
}

/// The explicit maintenance operation: recompute every category's product-id
/// list from the product catalog. Product writes never touch these lists.
pub async fn rebuild_categories(pool: &DbPool, user: &AuthUser) -> AppResult<UpdateResult> {
    ensure_admin(user)?;

    let result = sqlx::query(
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

    if let Err(err) = log_audit(
        pool,
        Some(&user.email),
        "categories_rebuild",
        Some("categories"),
        Some(serde_json::json!({ "categories": result.rows_affected() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(UpdateResult::new(
        result.rows_affected(),
        result.rows_affected(),
    ))
}
