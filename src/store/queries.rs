use crate::error::Result;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM kv WHERE key = ?1")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get::<String, _>("value")))
}

pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kv (key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove_value(pool: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM kv WHERE key = ?1")
        .bind(key)
        .execute(pool)
        .await?;
    Ok(())
}
