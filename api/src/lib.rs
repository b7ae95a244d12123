//! HTTP surface of the Nyaya backend.
//!
//! Exposed as a library so integration tests can build the full
//! application over in-memory repositories.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::{AppState, HealthProbe, StaticHealth};
