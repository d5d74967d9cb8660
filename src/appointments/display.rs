use super::model::{AppointmentStatus, AppointmentType, WireAppointment};
use serde::Serialize;

/// Appointment as the schedule table consumes it.
///
/// Date and time stay opaque strings here; they are only interpreted when a
/// row is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAppointment {
    pub id: String,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_name: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub location: String,
}

/// Project a wire appointment onto its display shape. Total: every input maps,
/// unknown type and status values included.
pub fn to_display(wire: &WireAppointment) -> DisplayAppointment {
    DisplayAppointment {
        id: wire.id.clone(),
        client_name: wire.client_name.clone(),
        trainer_id: Some(wire.trainer_id.clone()),
        trainer_name: Some(wire.trainer_name.clone()),
        date: wire.appointment_date.clone(),
        time: wire.start_time.clone(),
        duration: format_duration(wire.duration_minutes),
        kind: wire.type_.clone(),
        status: wire.status.clone(),
        location: wire.location.clone(),
    }
}

pub fn format_duration(minutes: u32) -> String {
    format!("{} min", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(duration_minutes: u32) -> WireAppointment {
        WireAppointment {
            id: "a1".to_string(),
            client_id: "c1".to_string(),
            trainer_id: "t1".to_string(),
            client_name: "Anna Smith".to_string(),
            trainer_name: "Casey Coach".to_string(),
            type_: AppointmentType::Training,
            appointment_date: "2025-03-17".to_string(),
            start_time: "09:00".to_string(),
            duration_minutes,
            status: AppointmentStatus::Scheduled,
            location: "Gym A".to_string(),
            created_at: "2025-03-01T10:00:00Z".to_string(),
            updated_at: "2025-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn duration_is_formatted_in_minutes() {
        assert_eq!(to_display(&wire(45)).duration, "45 min");
        assert_eq!(to_display(&wire(60)).duration, "60 min");
    }

    #[test]
    fn mapping_is_deterministic() {
        let w = wire(30);
        assert_eq!(to_display(&w), to_display(&w));
    }

    #[test]
    fn fields_are_projected() {
        let d = to_display(&wire(60));
        assert_eq!(d.id, "a1");
        assert_eq!(d.client_name, "Anna Smith");
        assert_eq!(d.trainer_id.as_deref(), Some("t1"));
        assert_eq!(d.trainer_name.as_deref(), Some("Casey Coach"));
        assert_eq!(d.date, "2025-03-17");
        assert_eq!(d.time, "09:00");
        assert_eq!(d.location, "Gym A");
    }

    #[test]
    fn unknown_categories_pass_through() {
        let mut w = wire(60);
        w.status = AppointmentStatus::from("pending");
        w.type_ = AppointmentType::from("yoga");
        let d = to_display(&w);
        assert_eq!(d.status.as_str(), "pending");
        assert_eq!(d.kind.as_str(), "yoga");
    }

    #[test]
    fn wire_json_maps_to_camel_case() {
        let w: WireAppointment = serde_json::from_str(
            r#"{
                "id": 7, "client_id": 3, "trainer_id": "t1",
                "client_name": "John Miller", "trainer_name": "Casey Coach",
                "type_": "check-in", "appointment_date": "2025-03-17",
                "start_time": "11:00", "duration_minutes": 30,
                "status": "scheduled", "location": "Online",
                "created_at": "", "updated_at": ""
            }"#,
        )
        .unwrap();
        let json = serde_json::to_value(to_display(&w)).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["clientName"], "John Miller");
        assert_eq!(json["trainerName"], "Casey Coach");
        assert_eq!(json["type"], "check-in");
        assert_eq!(json["duration"], "30 min");
    }
}
