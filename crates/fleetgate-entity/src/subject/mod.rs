//! Authenticated principals and role definitions.

pub mod model;
pub mod role;

pub use model::{Subject, SubjectAccount};
pub use role::RoleName;
