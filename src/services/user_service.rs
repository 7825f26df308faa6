use crate::{
    audit::log_audit,
    db::DbPool,
    dto::{
        common::UpdateResult,
        users::{ChangeRoleRequest, SignupRequest, SignupResponse},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_self},
    models::{Role, User},
};

/// Idempotent signup keyed by email. A duplicate call mutates nothing and
/// reports the existing account.
pub async fn signup(pool: &DbPool, payload: SignupRequest) -> AppResult<SignupResponse> {
    let inserted: Option<User> = sqlx::query_as(
        r#"
        INSERT INTO users (email, name, photo_url)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(&payload.user_email)
    .bind(&payload.name)
    .bind(&payload.photo_url)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(user) => {
            if let Err(err) = log_audit(
                pool,
                Some(&user.email),
                "user_signup",
                Some("users"),
                None,
            )
            .await
            {
                tracing::warn!(error = %err, "audit log failed");
            }
            Ok(SignupResponse::Created(user))
        }
        None => Ok(SignupResponse::AlreadyExists {
            message: "user already exists".to_string(),
            inserted_id: None,
        }),
    }
}

pub async fn list_users(pool: &DbPool, user: &AuthUser) -> AppResult<Vec<User>> {
    ensure_admin(user)?;
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(users)
}

/// Whether the caller's stored role matches the requested one. Only the
/// account owner may ask.
pub fn check_role(user: &AuthUser, role: Role, email: &str) -> AppResult<bool> {
    ensure_self(user, email)?;
    Ok(user.role == role)
}

pub async fn change_role(
    pool: &DbPool,
    user: &AuthUser,
    payload: ChangeRoleRequest,
) -> AppResult<UpdateResult> {
    ensure_admin(user)?;

    let result = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
        .bind(&payload.user_email)
        .bind(payload.role)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        pool,
        Some(&user.email),
        "role_change",
        Some("users"),
        Some(serde_json::json!({
            "user_email": payload.user_email,
            "role": payload.role.as_str(),
        })),
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
