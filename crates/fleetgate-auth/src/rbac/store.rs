//! Permission lookup abstraction.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use fleetgate_core::result::AppResult;
use fleetgate_database::repositories::permission::RolePermissionRepository;
use fleetgate_entity::permission::Permission;
use fleetgate_entity::subject::RoleName;

/// Lookup of the permissions assigned to a role.
#[async_trait]
pub trait PermissionStore: Send + Sync + std::fmt::Debug {
    /// The set of permissions assigned to a role. An unknown or empty
    /// assignment is an empty set, never an error.
    async fn permissions_for_role(&self, role: RoleName) -> AppResult<HashSet<Permission>>;
}

#[async_trait]
impl PermissionStore for RolePermissionRepository {
    async fn permissions_for_role(&self, role: RoleName) -> AppResult<HashSet<Permission>> {
        RolePermissionRepository::permissions_for_role(self, role).await
    }
}

/// In-memory permission store for single-node use and tests.
#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    assignments: DashMap<RoleName, HashSet<Permission>>,
}

impl MemoryPermissionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a permission to a role.
    pub fn grant(&self, role: RoleName, permission: Permission) {
        self.assignments.entry(role).or_default().insert(permission);
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn permissions_for_role(&self, role: RoleName) -> AppResult<HashSet<Permission>> {
        Ok(self
            .assignments
            .get(&role)
            .map(|set| set.clone())
            .unwrap_or_default())
    }
}
