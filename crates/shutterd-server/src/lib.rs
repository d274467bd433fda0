// ABOUTME: HTTP adapter for shutterd, mapping routes onto the capture manager and log store.
// ABOUTME: Uses Axum with mutex-guarded shared state so device and log access stay serialized.

pub mod api;
pub mod app_state;
pub mod config;
pub mod net;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, ShutterdConfig};
pub use routes::create_router;
