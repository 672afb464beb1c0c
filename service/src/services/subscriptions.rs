use anyhow::{Context, Result};
use rusqlite::Connection;
use time::OffsetDateTime;

/// Register a user for samples of an endpoint. Returns false if already registered.
pub fn subscribe(conn: &Connection, endpoint_id: &str, user_id: &str) -> Result<bool> {
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let rows = conn
        .execute(
            "INSERT OR IGNORE INTO sample_subscriptions (endpoint_id, user_id, subscribed_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![endpoint_id, user_id, now],
        )
        .context("Failed to insert subscription")?;

    Ok(rows > 0)
}

/// Remove a registration. Returns false if the user was not registered.
pub fn unsubscribe(conn: &Connection, endpoint_id: &str, user_id: &str) -> Result<bool> {
    let rows = conn
        .execute(
            "DELETE FROM sample_subscriptions WHERE endpoint_id = ?1 AND user_id = ?2",
            rusqlite::params![endpoint_id, user_id],
        )
        .context("Failed to delete subscription")?;

    Ok(rows > 0)
}
