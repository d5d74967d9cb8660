//! The locally cached identity of the current user.
//!
//! A [`SessionContext`] wraps the persisted storage and is passed explicitly to
//! everything that needs the token or the user record. It is written at login,
//! read at startup, and cleared at logout. A 401 from the API clears only the
//! token, which is enough for the next guarded command to demand a fresh login.

use crate::error::{Error, Result};
use crate::store::{SessionStorage, AUTH_TOKEN_KEY, USER_DATA_KEY};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Trainer,
    Admin,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "client" => Ok(Role::Client),
            "trainer" => Ok(Role::Trainer),
            "admin" => Ok(Role::Admin),
            other => Err(Error::UnknownRole {
                role: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Trainer => "trainer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cached user record. `role` is kept as the raw stored string so a record
/// with an unexpected role still loads; [`User::role`] does the checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl User {
    pub fn role(&self) -> Result<Role> {
        Role::parse(&self.role)
    }
}

/// Accept ids the server sends either as strings or as integers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Int(n) => n.to_string(),
    })
}

#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Read the cached user record.
    ///
    /// Returns `None`, after logging a warning, when the record is absent,
    /// unparsable, or the storage itself fails. The record is trusted as-is: no
    /// expiry check and no round trip to the server.
    pub async fn current_user(&self) -> Option<User> {
        match self.read_user().await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                warn!("User data not found in storage");
                None
            }
            Err(e) => {
                error!(error = %e, "Error reading user data");
                None
            }
        }
    }

    /// Strict variant of [`current_user`](Self::current_user) that surfaces a
    /// malformed record instead of degrading to `None`.
    pub async fn read_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.storage.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| Error::MalformedPersistedData {
                key: USER_DATA_KEY.to_string(),
                source,
            })
    }

    pub async fn token(&self) -> Option<String> {
        match self.storage.get(AUTH_TOKEN_KEY).await {
            Ok(Some(token)) => Some(token),
            Ok(None) => {
                warn!("Authentication token not found in storage");
                None
            }
            Err(e) => {
                error!(error = %e, "Error reading authentication token");
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(self.storage.get(AUTH_TOKEN_KEY).await, Ok(Some(_)))
    }

    /// Persist whatever parts of a login/registration response are present.
    pub async fn establish(&self, token: Option<&str>, user: Option<&User>) -> Result<()> {
        if let Some(token) = token {
            self.storage.set(AUTH_TOKEN_KEY, token).await?;
        }
        if let Some(user) = user {
            let raw = serde_json::to_string(user)?;
            self.storage.set(USER_DATA_KEY, &raw).await?;
        }
        debug!(has_token = token.is_some(), has_user = user.is_some(), "Session established");
        Ok(())
    }

    pub async fn clear_token(&self) -> Result<()> {
        self.storage.remove(AUTH_TOKEN_KEY).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.storage.remove(AUTH_TOKEN_KEY).await?;
        self.storage.remove(USER_DATA_KEY).await?;
        debug!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn trainer() -> User {
        User {
            id: "t1".to_string(),
            username: "coach".to_string(),
            full_name: "Casey Coach".to_string(),
            email: "casey@example.com".to_string(),
            role: "trainer".to_string(),
            phone_number: None,
        }
    }

    #[test]
    fn role_parse_is_closed() {
        assert_eq!(Role::parse("client").unwrap(), Role::Client);
        assert_eq!(Role::parse("trainer").unwrap(), Role::Trainer);
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert!(matches!(
            Role::parse("owner"),
            Err(Error::UnknownRole { role }) if role == "owner"
        ));
    }

    #[test]
    fn user_accepts_numeric_id() {
        let user: User = serde_json::from_str(
            r#"{"id":42,"username":"a","full_name":"A","email":"a@x","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.phone_number, None);
    }

    #[tokio::test]
    async fn missing_user_resolves_to_none() {
        let ctx = SessionContext::new(Arc::new(MemoryStorage::new()));
        assert_eq!(ctx.current_user().await, None);
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn malformed_user_degrades_to_none() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_DATA_KEY, "{not json").await.unwrap();
        let ctx = SessionContext::new(storage);

        assert_eq!(ctx.current_user().await, None);
        assert!(matches!(
            ctx.read_user().await,
            Err(Error::MalformedPersistedData { .. })
        ));
    }

    #[tokio::test]
    async fn establish_then_logout() {
        let ctx = SessionContext::new(Arc::new(MemoryStorage::new()));
        ctx.establish(Some("tok"), Some(&trainer())).await.unwrap();

        assert!(ctx.is_authenticated().await);
        assert_eq!(ctx.token().await.as_deref(), Some("tok"));
        assert_eq!(ctx.current_user().await, Some(trainer()));

        ctx.logout().await.unwrap();
        assert_eq!(ctx.token().await, None);
        assert_eq!(ctx.current_user().await, None);
    }

    #[tokio::test]
    async fn clear_token_keeps_user_record() {
        let ctx = SessionContext::new(Arc::new(MemoryStorage::new()));
        ctx.establish(Some("tok"), Some(&trainer())).await.unwrap();

        ctx.clear_token().await.unwrap();
        assert!(!ctx.is_authenticated().await);
        assert!(ctx.current_user().await.is_some());
    }
}
