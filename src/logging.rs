use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::fs;

/// Initialize logging subsystem
/// - File logging: Always enabled, writes to ~/.config/coachdesk/logs/
/// - Terminal logging: Only with COACHDESK_LOG env var or --verbose flag
pub fn init(verbose: bool) -> Result<()> {
    let log_dir = log_dir()?;

    fs::create_dir_all(&log_dir)?;

    // Rolling file appender - new file daily
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &log_dir,
        "coachdesk.log",
    );

    // File layer - always debug level
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_filter(EnvFilter::new("debug"));

    // Terminal layer - only if verbose or COACHDESK_LOG is set
    let terminal_layer = if verbose || std::env::var("COACHDESK_LOG").is_ok() {
        let filter = EnvFilter::try_from_env("COACHDESK_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));
        Some(fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter))
    } else {
        None
    };

    let registry = tracing_subscriber::registry()
        .with(file_layer);

    if let Some(terminal) = terminal_layer {
        registry.with(terminal).init();
    } else {
        registry.init();
    }

    Ok(())
}

/// Get the log directory path
pub fn log_dir() -> Result<std::path::PathBuf> {
    Ok(crate::config::config_dir()?.join("logs"))
}
