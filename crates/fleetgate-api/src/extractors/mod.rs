//! Request extractors.

pub mod auth;

pub use auth::AuthSubject;
