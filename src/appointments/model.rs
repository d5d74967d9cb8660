use crate::session::string_or_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a categorical wire value: a closed set of known variants plus an
/// `Other` escape so unexpected server values pass through untouched.
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(s) => s.as_str(),
                }
            }

            /// Label shown in tables and menus
            pub fn label(&self) -> String {
                capitalize(self.as_str())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(s),
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no-show",
});

wire_enum!(AppointmentType {
    Consultation => "consultation",
    Training => "training",
    Assessment => "assessment",
    CheckIn => "check-in",
});

// "no-show" -> "No-show", "check-in" -> "Check-in"
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Appointment as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAppointment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub client_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub trainer_id: String,
    pub client_name: String,
    pub trainer_name: String,
    pub type_: AppointmentType,
    pub appointment_date: String,
    pub start_time: String,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body for `POST /api/appointments` and the full form of `PUT /api/appointments/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentDraft {
    pub client_id: String,
    pub trainer_id: String,
    pub type_: AppointmentType,
    pub appointment_date: String,
    pub start_time: String,
    pub duration_minutes: u32,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

/// Partial update body, `{ "status": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
}
