pub mod display;
pub mod model;

pub use display::{to_display, DisplayAppointment};
pub use model::{AppointmentDraft, AppointmentStatus, AppointmentType, StatusUpdate, WireAppointment};
