pub mod auth;
pub mod book;
pub mod config;
pub mod logs;
pub mod schedule;
pub mod set_status;
pub mod update;
pub mod whoami;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::session::SessionContext;
use crate::store::Store;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "coachdesk")]
#[command(about = "A terminal client for personal-training appointment schedules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging to terminal
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Override config directory (for testing)
    #[arg(long, global = true)]
    pub config_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session locally
    Login(auth::LoginArgs),

    /// Create an account
    Register(auth::RegisterArgs),

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// List appointments visible to the current user
    #[command(visible_aliases = ["ls", "appointments"])]
    Schedule(schedule::ScheduleArgs),

    /// Change the status of an appointment
    #[command(visible_alias = "st")]
    SetStatus(set_status::SetStatusArgs),

    /// Book a new appointment
    Book(book::BookArgs),

    /// Update an existing appointment
    Update(update::UpdateArgs),

    /// Show, locate or edit the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// View log files
    Logs(logs::LogsArgs),

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login(args) => auth::login(args).await.map_err(Into::into),
        Commands::Register(args) => auth::register(args).await.map_err(Into::into),
        Commands::Logout => auth::logout().await.map_err(Into::into),
        Commands::Whoami => whoami::run().await.map_err(Into::into),
        Commands::Schedule(args) => schedule::run(args).await.map_err(Into::into),
        Commands::SetStatus(args) => set_status::run(args).await.map_err(Into::into),
        Commands::Book(args) => book::run(args).await.map_err(Into::into),
        Commands::Update(args) => update::run(args).await.map_err(Into::into),
        Commands::Config(command) => config::run(command).await.map_err(Into::into),
        Commands::Logs(args) => logs::run(args).await.map_err(Into::into),
        Commands::Completions { shell } => generate_completions(shell),
    }
}

/// Generate shell completions
pub fn generate_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    use clap::CommandFactory;
    use std::io;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "coachdesk", &mut io::stdout());
    Ok(())
}

/// Build an API client over the on-disk session store
pub(crate) async fn connect(config: &crate::config::Config) -> Result<ApiClient> {
    let store = Store::open().await?;
    let session = SessionContext::new(Arc::new(store));
    ApiClient::from_config(config, session)
}

/// Refuse to go on without a stored token; the caller is sent to `login`.
pub(crate) async fn require_login(client: &ApiClient) -> Result<()> {
    if client.session().is_authenticated().await {
        Ok(())
    } else {
        Err(Error::UnauthenticatedAccess)
    }
}

/// Read one line from stdin after printing `prompt`
pub(crate) fn prompt(prompt: &str) -> Result<String> {
    use std::io::{self, Write};

    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
