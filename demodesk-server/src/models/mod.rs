//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod demo_request;
pub mod metric;
pub mod health;

pub use validation::ValidationError;
pub use email::EmailAddress;
pub use demo_request::{DemoRequestIn, DemoRequestOut, DemoRequestPayload};
pub use metric::{Metric, MetricValue, MetricsOut};
pub use health::{DatabaseAvailability, DiagnosticsReport, HealthStatus, API_VERSION};
