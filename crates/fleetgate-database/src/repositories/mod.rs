//! Concrete repository implementations over PostgreSQL.

pub mod permission;
pub mod session;
pub mod subject;

pub use permission::RolePermissionRepository;
pub use session::SessionRepository;
pub use subject::SubjectRepository;
