use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::{
        cart::{AddToCartRequest, CartLine, CartQuery, CartView, QuantityChange},
        common::UpdateResult,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_self},
    models::{Cart, Product},
};

#[derive(FromRow)]
struct CartLineRow {
    product_id: Uuid,
    name: String,
    generic_name: Option<String>,
    description: Option<String>,
    category: String,
    company: String,
    unit_price: i64,
    image: Option<String>,
    created_at: DateTime<Utc>,
    quantity: i32,
}

/// Resolve the owner's cart with full product records attached per line.
pub async fn get_cart(pool: &DbPool, user: &AuthUser, query: CartQuery) -> AppResult<CartView> {
    ensure_self(user, &query.email)?;

    let cart: Option<Cart> = sqlx::query_as("SELECT * FROM carts WHERE user_email = $1")
        .bind(&query.email)
        .fetch_optional(pool)
        .await?;
    let cart = cart.ok_or(AppError::NotFound)?;

    let rows = sqlx::query_as::<_, CartLineRow>(
        r#"
        SELECT p.id AS product_id, p.name, p.generic_name, p.description,
               p.category, p.company, p.unit_price, p.image, p.created_at,
               ci.quantity
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.cart_id = $1
        ORDER BY ci.created_at
        "#,
    )
    .bind(cart.id)
    .fetch_all(pool)
    .await?;

    let items = rows
        .into_iter()
        .map(|row| CartLine {
            product: Product {
                id: row.product_id,
                name: row.name,
                generic_name: row.generic_name,
                description: row.description,
                category: row.category,
                company: row.company,
                unit_price: row.unit_price,
                image: row.image,
                created_at: row.created_at,
            },
            quantity: row.quantity,
        })
        .collect();

    Ok(CartView {
        id: cart.id,
        user_email: cart.user_email,
        items,
    })
}

/// Add one unit of a product to the caller's cart. The cart upsert is keyed
/// by owner email and the line upsert by (cart, product), so concurrent calls
/// can neither create a second cart nor a duplicate line.
pub async fn add_item(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<UpdateResult> {
    let product: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(pool)
        .await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    // The DO UPDATE is a no-op so RETURNING always yields the surviving row.
    let (cart_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO carts (id, user_email)
        VALUES ($1, $2)
        ON CONFLICT (user_email) DO UPDATE SET user_email = EXCLUDED.user_email
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&user.email)
    .fetch_one(pool)
    .await?;

    let result = sqlx::query(
        r#"
        INSERT INTO cart_items (cart_id, product_id, quantity)
        VALUES ($1, $2, 1)
        ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = cart_items.quantity + 1
        "#,
    )
    .bind(cart_id)
    .bind(payload.product_id)
    .execute(pool)
    .await?;

    if let Err(err) = log_audit(
        pool,
        Some(&user.email),
        "cart_add_item",
        Some("cart_items"),
        Some(serde_json::json!({ "product_id": payload.product_id })),
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

/// Increment always adds 1; decrement subtracts 1 above quantity 1 and
/// removes the line at 1. Both are single-row conditional statements so a
/// concurrent change to another line is never overwritten.
pub async fn change_quantity(
    pool: &DbPool,
    user: &AuthUser,
    cart_id: Uuid,
    change: QuantityChange,
    payload: AddToCartRequest,
) -> AppResult<UpdateResult> {
    require_cart_owner(pool, user, cart_id).await?;

    let affected = match change {
        QuantityChange::Increment => {
            sqlx::query(
                "UPDATE cart_items SET quantity = quantity + 1 WHERE cart_id = $1 AND product_id = $2",
            )
            .bind(cart_id)
            .bind(payload.product_id)
            .execute(pool)
            .await?
            .rows_affected()
        }
        QuantityChange::Decrement => {
            let reduced = sqlx::query(
                "UPDATE cart_items SET quantity = quantity - 1 WHERE cart_id = $1 AND product_id = $2 AND quantity > 1",
            )
            .bind(cart_id)
            .bind(payload.product_id)
            .execute(pool)
            .await?
            .rows_affected();

            if reduced > 0 {
                reduced
            } else {
                sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
                    .bind(cart_id)
                    .bind(payload.product_id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
        }
    };

    if affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(UpdateResult::new(affected, affected))
}

/// Empty the cart's line list. The cart row and its id persist.
pub async fn clear_cart(pool: &DbPool, user: &AuthUser, cart_id: Uuid) -> AppResult<UpdateResult> {
    require_cart_owner(pool, user, cart_id).await?;

    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
        .bind(cart_id)
        .execute(pool)
        .await?;

    if let Err(err) = log_audit(
        pool,
        Some(&user.email),
        "cart_clear",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_id": cart_id })),
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

async fn require_cart_owner(pool: &DbPool, user: &AuthUser, cart_id: Uuid) -> AppResult<()> {
    let owner: Option<(String,)> = sqlx::query_as("SELECT user_email FROM carts WHERE id = $1")
        .bind(cart_id)
        .fetch_optional(pool)
        .await?;
    let owner = owner.ok_or(AppError::NotFound)?.0;
    ensure_self(user, &owner)
}
