use crate::error::Result;
use async_trait::async_trait;

/// Key holding the opaque bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Key holding the JSON-serialized user record
pub const USER_DATA_KEY: &str = "user_data";

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read a value, `None` if the key was never set or has been removed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
