use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api")]
    pub api: ApiConfig,

    #[serde(default = "default_display")]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: default_api(),
            display: default_display(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the API server, without the port
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout; unset leaves it to the transport
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api() -> ApiConfig {
    ApiConfig {
        base_url: default_base_url(),
        port: default_port(),
        timeout_secs: None,
    }
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string used for the date column
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_display() -> DisplayConfig {
    DisplayConfig {
        date_format: default_date_format(),
        color: default_color(),
    }
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Effective API root, `<base_url>:<port>` unless COACHDESK_API_URL overrides it
    pub fn api_url(&self) -> String {
        self.api_url_with(std::env::var("COACHDESK_API_URL").ok().as_deref())
    }

    /// `<base_url>:<port>`, unless an override URL replaces it whole
    pub fn api_url_with(&self, override_url: Option<&str>) -> String {
        match override_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}:{}", self.api.base_url.trim_end_matches('/'), self.api.port),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let base = &self.api.base_url;
        let host = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"))
            .ok_or_else(|| Error::InvalidUrl { url: base.clone() })?;
        if host.is_empty() || host.contains(':') || host.contains('/') {
            return Err(Error::InvalidUrl { url: base.clone() });
        }

        if self.api.port == 0 {
            return Err(Error::ConfigError("api.port must be non-zero".to_string()));
        }

        // chrono reports bad specifiers as a fmt::Error when rendering
        let probe = chrono::NaiveDate::from_ymd_opt(2025, 3, 17)
            .ok_or_else(|| Error::ConfigError("invalid probe date".to_string()))?;
        let mut rendered = String::new();
        if write!(rendered, "{}", probe.format(&self.display.date_format)).is_err() {
            return Err(Error::ConfigError(format!(
                "display.date_format '{}' is not a valid date format",
                self.display.date_format
            )));
        }

        Ok(())
    }
}
