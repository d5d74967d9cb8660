use crate::appointments::{AppointmentDraft, AppointmentType};
use crate::cli::{connect, require_login};
use crate::config;
use crate::error::Result;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct BookArgs {
    /// Client id (see `coachdesk whoami` for your own)
    #[arg(long)]
    pub client_id: String,

    /// Trainer id
    #[arg(long)]
    pub trainer_id: String,

    /// consultation, training, assessment or check-in
    #[arg(short = 't', long = "type", default_value = "training")]
    pub kind: String,

    /// Date as YYYY-MM-DD
    #[arg(short, long)]
    pub date: String,

    /// Start time as HH:MM
    #[arg(long)]
    pub time: String,

    /// Duration in minutes
    #[arg(long, default_value_t = 60)]
    pub duration: u32,

    #[arg(short, long)]
    pub location: String,
}

pub async fn run(args: BookArgs) -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;
    require_login(&client).await?;

    let draft = AppointmentDraft {
        client_id: args.client_id,
        trainer_id: args.trainer_id,
        type_: AppointmentType::from(args.kind.as_str()),
        appointment_date: args.date,
        start_time: args.time,
        duration_minutes: args.duration,
        location: args.location,
        status: None,
    };

    let created = client.create_appointment(&draft).await?;
    let id = match created.get("id") {
        Some(serde_json::Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    };
    info!(id = %id, "Appointment created");
    println!(
        "Booked {} on {} at {} (id {})",
        draft.type_.label(),
        draft.appointment_date,
        draft.start_time,
        id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::error::ErrorKind;
    use clap::Parser;

    #[test]
    fn booking_requires_both_ids() {
        let err = Cli::try_parse_from([
            "coachdesk", "book", "--trainer-id", "t1", "--date", "2025-03-17", "--time", "09:00",
            "--location", "Gym A",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("--client-id"));
    }

    #[test]
    fn booking_parses_with_defaults() {
        let cli = Cli::try_parse_from([
            "coachdesk", "book", "--client-id", "c1", "--trainer-id", "t1", "--date", "2025-03-17",
            "--time", "09:00", "--location", "Gym A",
        ])
        .unwrap();
        match cli.command {
            Commands::Book(args) => {
                assert_eq!(args.client_id, "c1");
                assert_eq!(args.kind, "training");
                assert_eq!(args.duration, 60);
            }
            _ => panic!("expected the book command"),
        }
    }
}
