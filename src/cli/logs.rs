use clap::Args;
use crate::error::Result;
use crate::logging;
use std::fs;
use std::io::{BufRead, BufReader};

#[derive(Args)]
pub struct LogsArgs {
    /// Show logs from a specific date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Number of lines to show
    #[arg(short, long, default_value = "100")]
    pub lines: usize,
}

pub async fn run(args: LogsArgs) -> Result<()> {
    let log_file = logging::log_dir()?.join(log_file_name(args.date.as_deref()));

    if !log_file.exists() {
        eprintln!("Log file not found: {}", log_file.display());
        return Ok(());
    }

    let file = fs::File::open(&log_file)?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().collect::<std::result::Result<_, _>>()?;

    let start = lines.len().saturating_sub(args.lines);
    for line in &lines[start..] {
        println!("{}", line);
    }

    Ok(())
}

/// The daily appender suffixes each file with its UTC date, not the local one.
pub fn log_file_name(date: Option<&str>) -> String {
    match date {
        Some(date) => format!("coachdesk.log.{}", date),
        None => format!("coachdesk.log.{}", chrono::Utc::now().format("%Y-%m-%d")),
    }
}
