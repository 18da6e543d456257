//! Subject models.
//!
//! `SubjectAccount` is the stored account (credentials, role assignments,
//! organizational placement). `Subject` is the authenticated principal
//! reconstructed from verified access-token claims; it is never persisted
//! separately from those claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::RoleName;

/// A stored account, as loaded from the subject store.
///
/// Role assignments are many-to-many and aggregated here by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAccount {
    /// Primary key.
    pub id: Uuid,
    /// Login email (unique).
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Assigned roles.
    pub roles: Vec<RoleName>,
    /// Owning team, if the subject is team-scoped.
    pub team_id: Option<Uuid>,
    /// Department of the owning team.
    pub department_id: Option<Uuid>,
    /// Whether the account may authenticate.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The authenticated principal derived from verified token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Subject ID (the `sub` claim).
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Roles held at token issuance.
    pub roles: Vec<RoleName>,
    /// Team claim, if present.
    pub team_id: Option<Uuid>,
}

impl Subject {
    /// Whether the subject holds the given role.
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Whether any held role grants implicit allow on every RBAC check.
    pub fn is_super_admin(&self) -> bool {
        self.roles.iter().any(RoleName::is_super_admin)
    }

    /// Whether any held role bypasses organizational scoping.
    pub fn bypasses_scope(&self) -> bool {
        self.roles.iter().any(RoleName::bypasses_scope)
    }
}
