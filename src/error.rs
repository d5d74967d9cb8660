use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("API request failed: {message}")]
    NetworkFailure { message: String, status: Option<u16> },

    #[error("Authorization failed: Please log in again with: coachdesk login")]
    AuthExpired,

    #[error("User not authenticated. Log in first with: coachdesk login")]
    UnauthenticatedAccess,

    #[error("Unknown role '{role}'. Expected one of: client, trainer, admin")]
    UnknownRole { role: String },

    #[error("Appointment '{id}' not found")]
    AppointmentNotFound { id: String },

    #[error("Schedule did not load: {message}")]
    ScheduleUnavailable { message: String },

    #[error("Stored {key} is malformed: {source}. Log in again with: coachdesk login")]
    MalformedPersistedData {
        key: String,
        source: serde_json::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Database corrupted: {path}. {suggestion}")]
    DatabaseCorrupted { path: PathBuf, suggestion: String },

    #[error("Failed to open database: {path}")]
    DatabaseOpen { path: PathBuf, source: sqlx::Error },

    #[error("Migration failed: {0}")]
    MigrationFailed(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Invalid token format")]
    InvalidToken,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Anyhow error: {0}")]
    AnyhowError(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Error::NetworkFailure {
            message: message.into(),
            status: None,
        }
    }
}
