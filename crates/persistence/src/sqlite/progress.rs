//! Completed-lesson progress per account

use smarty_core::{Error, Result};
use sqlx::SqlitePool;

/// Completed lesson ids for an account
pub async fn get_progress(pool: &SqlitePool, account: &str) -> Result<Vec<String>> {
    let json: Option<String> =
        sqlx::query_scalar("SELECT lessons FROM progress WHERE account = ?")
            .bind(account)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    match json {
        Some(j) => Ok(serde_json::from_str(&j)?),
        None => Ok(Vec::new()),
    }
}

/// Replace the completed lesson ids for an account
pub async fn save_progress(pool: &SqlitePool, account: &str, lessons: &[String]) -> Result<()> {
    let json = serde_json::to_string(lessons)?;

    sqlx::query("INSERT OR REPLACE INTO progress (account, lessons) VALUES (?, ?)")
        .bind(account)
        .bind(&json)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}
