//! Role-permission repository implementation.

use std::collections::HashSet;

use sqlx::PgPool;

use fleetgate_core::error::{AppError, ErrorKind};
use fleetgate_core::result::AppResult;
use fleetgate_entity::permission::Permission;
use fleetgate_entity::subject::RoleName;

/// Repository for the role → permission join.
#[derive(Debug, Clone)]
pub struct RolePermissionRepository {
    pool: PgPool,
}

impl RolePermissionRepository {
    /// Create a new role-permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the set of permissions assigned to a role.
    pub async fn permissions_for_role(&self, role: RoleName) -> AppResult<HashSet<Permission>> {
        let rows = sqlx::query_as::<_, Permission>(
            "SELECT p.resource, p.action FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.id \
             WHERE rp.role = $1",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load role permissions", e)
        })?;

        Ok(rows.into_iter().collect())
    }
}
