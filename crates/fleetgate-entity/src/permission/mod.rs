//! Permission pairs.

pub mod model;

pub use model::Permission;
