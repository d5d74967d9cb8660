use crate::appointments::{AppointmentDraft, AppointmentStatus, AppointmentType, WireAppointment};
use crate::cli::{connect, require_login};
use crate::config;
use crate::error::{Error, Result};
use clap::Args;
use tracing::info;

/// Full update: unspecified fields keep their current values.
#[derive(Args, Default)]
pub struct UpdateArgs {
    /// Appointment id
    pub id: String,

    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    #[arg(short, long)]
    pub date: Option<String>,

    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub duration: Option<u32>,

    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(short, long)]
    pub status: Option<String>,
}

pub async fn run(args: UpdateArgs) -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;
    require_login(&client).await?;

    let user = client.session().current_user().await;
    let current = find_appointment(client.load_appointments(user.as_ref()).await?, &args.id)?;

    let draft = merge(&current, &args);
    client.update_appointment(&args.id, &draft).await?;

    info!(id = %args.id, "Appointment updated");
    println!("Updated appointment {}", args.id);
    Ok(())
}

/// Pick one appointment out of the caller's scoped list
pub fn find_appointment(appointments: Vec<WireAppointment>, id: &str) -> Result<WireAppointment> {
    appointments
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| Error::AppointmentNotFound { id: id.to_string() })
}

/// Overlay the given flags on the current appointment
pub fn merge(current: &WireAppointment, args: &UpdateArgs) -> AppointmentDraft {
    AppointmentDraft {
        client_id: current.client_id.clone(),
        trainer_id: current.trainer_id.clone(),
        type_: args
            .kind
            .as_deref()
            .map(AppointmentType::from)
            .unwrap_or_else(|| current.type_.clone()),
        appointment_date: args.date.clone().unwrap_or_else(|| current.appointment_date.clone()),
        start_time: args.time.clone().unwrap_or_else(|| current.start_time.clone()),
        duration_minutes: args.duration.unwrap_or(current.duration_minutes),
        location: args.location.clone().unwrap_or_else(|| current.location.clone()),
        status: Some(
            args.status
                .as_deref()
                .map(AppointmentStatus::from)
                .unwrap_or_else(|| current.status.clone()),
        ),
    }
}
