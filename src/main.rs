use clap::Parser;
use coachdesk::cli::{self, Cli};
use coachdesk::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set config dir override before anything resolves paths
    if let Some(config_dir) = &cli.config_dir {
        std::env::set_var("COACHDESK_CONFIG_DIR_OVERRIDE", config_dir);
    }

    logging::init(cli.verbose)?;

    cli::run(cli).await
}
