//! Organizational scope entities.

pub mod model;

pub use model::{Department, Team};
