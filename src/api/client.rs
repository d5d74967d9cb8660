use crate::api::http::ReqwestTransport;
use crate::api::traits::{HttpRequest, Method, Transport};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{SessionContext, User};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterCredentials {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Body returned by the login and registration endpoints. Either part may be
/// missing; whatever is present gets persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn from_config(config: &Config, session: SessionContext) -> Result<Self> {
        let timeout = config.api.timeout_secs.map(Duration::from_secs);
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::new(config.api_url(), Arc::new(transport), session))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated JSON request against `endpoint` (a path starting with `/`).
    ///
    /// The stored token is attached when there is one. A 401 removes it from
    /// storage before failing, so later requests go out without it.
    #[instrument(skip(self, body))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            token: self.session.token().await,
            body: if method == Method::Get { None } else { body },
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(endpoint, error = %e, "API request failed");
                return Err(e);
            }
        };

        if !response.is_success() {
            if response.status == 401 {
                error!(endpoint, "Authorization error: token may be invalid or expired");
                if let Err(e) = self.session.clear_token().await {
                    error!(endpoint, error = %e, "Failed to clear stored token");
                }
                return Err(Error::AuthExpired);
            }

            error!(endpoint, status = response.status, "API request failed");
            return Err(Error::NetworkFailure {
                message: status_line(response.status, &response.status_text),
                status: Some(response.status),
            });
        }

        parse_body(&response.body)
    }

    /// `POST /api/auth/login`; stores the returned token and user record.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.authenticate("/api/auth/login", serde_json::to_value(credentials)?, "Authentication failed")
            .await
    }

    /// `POST /api/users`; stores the token and user record if the server returns them.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthResponse> {
        self.authenticate("/api/users", serde_json::to_value(credentials)?, "Registration failed")
            .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await
    }

    async fn authenticate(&self, endpoint: &str, body: Value, failure: &str) -> Result<AuthResponse> {
        let request = HttpRequest {
            method: Method::Post,
            url: format!("{}{}", self.base_url, endpoint),
            token: None,
            body: Some(body),
        };

        let response = self.transport.send(request).await.map_err(|e| {
            error!(endpoint, error = %e, "{}", failure);
            e
        })?;

        if !response.is_success() {
            error!(endpoint, status = response.status, "{}", failure);
            return Err(Error::NetworkFailure {
                message: format!("{}: {}", failure, status_line(response.status, &response.status_text)),
                status: Some(response.status),
            });
        }

        let auth: AuthResponse = parse_body(&response.body)?;
        self.session
            .establish(auth.token.as_deref(), auth.user.as_ref())
            .await?;
        info!(endpoint, "Authenticated");
        Ok(auth)
    }
}

fn status_line(status: u16, text: &str) -> String {
    if text.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, text)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body)
        .map_err(|e| Error::network(format!("Invalid response body: {}", e)))
}
