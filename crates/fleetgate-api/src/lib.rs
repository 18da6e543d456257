//! # fleetgate-api
//!
//! The FleetGate HTTP surface: auth endpoints, the gateway fallback
//! handler, middleware, and DTOs, assembled into an Axum router.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
