use crate::api::client::ApiClient;
use crate::api::traits::Method;
use crate::appointments::{AppointmentDraft, AppointmentStatus, StatusUpdate, WireAppointment};
use crate::error::{Error, Result};
use crate::session::{Role, User};
use serde_json::Value;
use tracing::{debug, instrument};

/// Collection endpoint a user is allowed to read: own appointments for clients
/// and trainers, everything for admins.
pub fn appointments_endpoint(user: &User) -> Result<String> {
    Ok(match user.role()? {
        Role::Client => format!("/api/appointments/client/{}", user.id),
        Role::Trainer => format!("/api/appointments/trainer/{}", user.id),
        Role::Admin => "/api/appointments".to_string(),
    })
}

impl ApiClient {
    /// Fetch the appointments visible to `user`. Single attempt, no retry.
    #[instrument(skip(self, user))]
    pub async fn load_appointments(&self, user: Option<&User>) -> Result<Vec<WireAppointment>> {
        let user = user.ok_or(Error::UnauthenticatedAccess)?;
        let endpoint = appointments_endpoint(user)?;
        debug!(role = %user.role, endpoint = %endpoint, "Loading appointments");

        let appointments: Vec<WireAppointment> = self.request(Method::Get, &endpoint, None).await?;
        debug!(count = appointments.len(), "Loaded appointments");
        Ok(appointments)
    }

    pub async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<Value> {
        self.request(Method::Post, "/api/appointments", Some(serde_json::to_value(draft)?))
            .await
    }

    pub async fn update_appointment(&self, id: &str, draft: &AppointmentDraft) -> Result<Value> {
        self.request(
            Method::Put,
            &format!("/api/appointments/{}", id),
            Some(serde_json::to_value(draft)?),
        )
        .await
    }

    pub async fn update_appointment_status(&self, id: &str, status: &AppointmentStatus) -> Result<Value> {
        let body = StatusUpdate {
            status: status.clone(),
        };
        self.request(
            Method::Put,
            &format!("/api/appointments/{}", id),
            Some(serde_json::to_value(&body)?),
        )
        .await
    }
}
