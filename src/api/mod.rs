pub mod appointments;
pub mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod fake;
pub mod http;
pub mod traits;

pub use appointments::appointments_endpoint;
pub use client::{ApiClient, AuthResponse, LoginCredentials, RegisterCredentials};
pub use traits::{HttpRequest, HttpResponse, Method, Transport};
