//! demodesk-server: HTTP backend for demo request intake
//!
//! Collects demo request leads into a document store, reports illustrative
//! insight metrics, and exposes health/diagnostic views that keep working
//! when the store is unreachable.

pub mod config;
pub mod handlers;
pub mod http;
pub mod models;
pub mod state;
pub mod store;

pub use config::{ConfigError, DatabaseConfig, EnvSource, ServerConfig};
pub use http::{build_router, run_server, ServerError};
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore, StoreError, StoreHandle};
