use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Storage key for the JSON-encoded clock list.
pub const CLOCKS_KEY: &str = "chrono-world-clocks";
/// Storage key for the theme.
pub const THEME_KEY: &str = "chrono-theme";

/// One key-value row in the `preferences` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Preference {
    /// Fixed storage key
    pub key: String,
    /// Stored text, normally JSON
    pub value: String,
    /// RFC 3339 time of the last write
    pub updated_at: String,
}

impl Preference {
    pub async fn get(
        pool: &sqlx::SqlitePool,
        key: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Preference>(
            "SELECT key, value, updated_at FROM preferences WHERE key = ?"
        )
        .bind(key)
        .fetch_optional(pool)
        .await
    }

    /// Inserts or overwrites the value stored under `key`.
    pub async fn set(
        pool: &sqlx::SqlitePool,
        key: &str,
        value: &str,
    ) -> Result<Self, sqlx::Error> {
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#
        )
        .bind(key)
        .bind(value)
        .bind(&updated_at)
        .execute(pool)
        .await?;

        Ok(Preference {
            key: key.to_string(),
            value: value.to_string(),
            updated_at,
        })
    }

    /// Removes `key`; returns whether a row was deleted.
    pub async fn delete(
        pool: &sqlx::SqlitePool,
        key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(key)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Preference>(
            "SELECT key, value, updated_at FROM preferences ORDER BY key"
        )
        .fetch_all(pool)
        .await
    }
}
