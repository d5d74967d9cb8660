use crate::error::Result;
use crate::store::traits::SessionStorage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local storage, used for tests and one-shot invocations.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_ok, block_on};

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        block_on(async {
            assert_ok!(storage.set("auth_token", "secret").await);
            assert_eq!(assert_ok!(storage.get("auth_token").await).as_deref(), Some("secret"));

            assert_ok!(storage.remove("auth_token").await);
            assert_eq!(assert_ok!(storage.get("auth_token").await), None);
        });
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert_ok!(block_on(storage.remove("user_data")));
    }
}
