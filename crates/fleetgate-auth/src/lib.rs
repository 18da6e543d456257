//! # fleetgate-auth
//!
//! Authentication and authorization for the FleetGate platform.
//!
//! ## Modules
//!
//! - `jwt` — access token creation and stateless validation
//! - `password` — Argon2id password hashing
//! - `session` — refresh session store, rotation, and the token service
//! - `rbac` — role-based permission evaluation with bounded-staleness caching
//! - `scope` — organizational (team/department) scope checks

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod scope;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use rbac::{PermissionStore, RbacEvaluator};
pub use scope::ScopeResolver;
pub use session::{SessionStore, SubjectStore, TokenPair, TokenService};
