use crate::appointments::AppointmentStatus;
use crate::cli::schedule::{print_page, ScheduleArgs};
use crate::cli::{connect, require_login};
use crate::config;
use crate::error::Result;
use crate::schedule::{SchedulePage, TerminalNotifier};
use clap::Args;

#[derive(Args)]
pub struct SetStatusArgs {
    /// Appointment id
    pub id: String,

    /// New status: scheduled, completed, cancelled or no-show
    pub status: String,

    /// Don't print the reloaded schedule
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn run(args: SetStatusArgs) -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;
    require_login(&client).await?;

    let notifier = TerminalNotifier::new(config.display.color);
    let mut page = SchedulePage::mount(&client, &notifier).await?;

    // A 401 during the mount has already dropped the token
    if page.error().is_some() {
        require_login(&client).await?;
    }

    page.set_status(&args.id, AppointmentStatus::from(args.status.as_str()))
        .await?;

    // The page has been reloaded with default filters
    if !args.quiet {
        print_page(&page, &config, &ScheduleArgs::default())?;
    }
    Ok(())
}
