pub mod api;
pub mod appointments;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod schedule;
pub mod session;
pub mod store;

pub use error::{Error, Result};
