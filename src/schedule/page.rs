use crate::api::ApiClient;
use crate::appointments::{to_display, AppointmentStatus, DisplayAppointment};
use crate::error::{Error, Result};
use crate::schedule::notify::Notifier;
use crate::schedule::render::{build_table, Table};
use crate::schedule::view::ViewState;
use crate::session::User;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Loaded(Vec<DisplayAppointment>),
    /// Inline message shown in place of the table
    Failed(String),
}

/// One mounted schedule view: the session it was mounted for, the fetched rows
/// and the filter state over them.
pub struct SchedulePage<'a> {
    client: &'a ApiClient,
    notifier: &'a dyn Notifier,
    user: User,
    content: PageContent,
    pub view: ViewState,
}

impl<'a> SchedulePage<'a> {
    /// Resolve the session and fetch once. Without a session this fails with
    /// `UnauthenticatedAccess`; a failed fetch still yields a page, holding the
    /// error instead of rows.
    #[instrument(skip_all)]
    pub async fn mount(client: &'a ApiClient, notifier: &'a dyn Notifier) -> Result<Self> {
        let user = client
            .session()
            .current_user()
            .await
            .ok_or(Error::UnauthenticatedAccess)?;

        let view = match user.role() {
            Ok(role) => ViewState::new(role),
            Err(_) => ViewState::default(),
        };

        let content = match client.load_appointments(Some(&user)).await {
            Ok(wire) => PageContent::Loaded(wire.iter().map(to_display).collect()),
            Err(e) => {
                warn!(error = %e, "Failed to load appointments");
                notifier.error(&format!("Failed to load appointments: {}", e));
                PageContent::Failed(e.to_string())
            }
        };

        Ok(Self {
            client,
            notifier,
            user,
            content,
            view,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn error(&self) -> Option<&str> {
        match &self.content {
            PageContent::Failed(message) => Some(message),
            PageContent::Loaded(_) => None,
        }
    }

    /// All fetched rows, before filtering
    pub fn appointments(&self) -> &[DisplayAppointment] {
        match &self.content {
            PageContent::Loaded(rows) => rows,
            PageContent::Failed(_) => &[],
        }
    }

    pub fn visible_rows(&self) -> Vec<&DisplayAppointment> {
        self.view.apply(self.appointments())
    }

    /// `None` when the fetch failed and the error replaces the table.
    pub fn table(&self, date_format: &str) -> Option<Table> {
        match self.content {
            PageContent::Loaded(_) => Some(build_table(&self.visible_rows(), &self.view.columns, date_format)),
            PageContent::Failed(_) => None,
        }
    }

    /// Change one appointment's status. On success the page is reloaded from
    /// scratch, which also resets the filters. On failure the rows stay as they
    /// were and the error is returned.
    ///
    /// A page whose fetch failed has no rows to act on, so nothing is sent.
    #[instrument(skip(self))]
    pub async fn set_status(&mut self, id: &str, status: AppointmentStatus) -> Result<()> {
        if let PageContent::Failed(message) = &self.content {
            warn!(id, "Refusing status change on a page that failed to load");
            if !self.client.session().is_authenticated().await {
                return Err(Error::AuthExpired);
            }
            return Err(Error::ScheduleUnavailable {
                message: message.clone(),
            });
        }

        match self.client.update_appointment_status(id, &status).await {
            Ok(_) => {
                info!(id, status = %status, "Appointment status updated");
                self.notifier
                    .success(&format!("Appointment {} marked as {}", id, status.label()));
                self.reload().await
            }
            Err(e) => {
                self.notifier
                    .error(&format!("Failed to update appointment {}: {}", id, e));
                Err(e)
            }
        }
    }

    pub async fn reload(&mut self) -> Result<()> {
        *self = Self::mount(self.client, self.notifier).await?;
        Ok(())
    }
}
