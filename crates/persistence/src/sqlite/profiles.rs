//! User profile operations

use smarty_core::{Error, Result, UserProfile};
use sqlx::SqlitePool;

/// Get the stored profile for an account
pub async fn get_user(pool: &SqlitePool, account: &str) -> Result<Option<UserProfile>> {
    let json: Option<String> =
        sqlx::query_scalar("SELECT profile FROM users WHERE account = ?")
            .bind(account)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

/// Insert or replace a profile, keyed by its email
pub async fn save_user(pool: &SqlitePool, user: &UserProfile) -> Result<()> {
    if user.email.trim().is_empty() {
        return Err(Error::InvalidData("profile has no account email".to_string()));
    }

    let json = serde_json::to_string(user)?;

    sqlx::query(
        r#"
        INSERT INTO users (account, profile)
        VALUES (?, ?)
        ON CONFLICT(account) DO UPDATE SET
            profile = excluded.profile,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&user.email)
    .bind(&json)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Number of stored accounts
pub async fn count_users(pool: &SqlitePool) -> Result<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(count.max(0) as u64)
}
