pub mod memory;
pub mod queries;
pub mod traits;

use crate::config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use memory::MemoryStorage;
pub use traits::{SessionStorage, AUTH_TOKEN_KEY, USER_DATA_KEY};

/// SQLite-backed key-value store holding the persisted client state.
#[derive(Clone)]
pub struct Store {
    pool: Arc<SqlitePool>,
}

impl Store {
    pub async fn open() -> Result<Self> {
        let db_path = db_path()?;
        Self::open_at(&db_path).await
    }

    pub async fn open_at(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_exists = db_path.exists();

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                if db_exists {
                    Error::DatabaseCorrupted {
                        path: db_path.to_path_buf(),
                        suggestion: format!(
                            "Try: mv {} {}.bak && coachdesk login",
                            db_path.display(),
                            db_path.display()
                        ),
                    }
                } else {
                    Error::DatabaseOpen {
                        path: db_path.to_path_buf(),
                        source: e,
                    }
                }
            })?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_path() -> Result<PathBuf> {
    Ok(config::ensure_config_dir()?.join("coachdesk.db"))
}

#[async_trait]
impl SessionStorage for Store {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        queries::get_value(self.pool(), key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        queries::set_value(self.pool(), key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        queries::remove_value(self.pool(), key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_at_creates_database_and_round_trips_values() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let store = Store::open_at(&db_path).await.unwrap();
        assert!(db_path.exists());

        store.set(AUTH_TOKEN_KEY, "abc").await.unwrap();
        store.set(AUTH_TOKEN_KEY, "def").await.unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("def"));

        store.remove(AUTH_TOKEN_KEY).await.unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let store = Store::open_at(&db_path).await.unwrap();
            store.set(USER_DATA_KEY, "{}").await.unwrap();
            store.pool().close().await;
        }

        let store = Store::open_at(&db_path).await.unwrap();
        assert_eq!(store.get(USER_DATA_KEY).await.unwrap().as_deref(), Some("{}"));
    }
}
