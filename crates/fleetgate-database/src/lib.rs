//! # fleetgate-database
//!
//! PostgreSQL connection management and concrete repository implementations
//! for the FleetGate authorization data model.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
