//! RBAC evaluation — computes whether a subject may perform an action on a
//! resource.
//!
//! The model is strictly additive: there is no explicit deny. A check
//! passes iff the `(resource, action)` pair is in the union of the
//! subject's role permissions, or the subject holds the super-admin role.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use fleetgate_core::error::AppError;
use fleetgate_core::traits::CacheProvider;
use fleetgate_entity::permission::Permission;
use fleetgate_entity::subject::{RoleName, Subject};

use super::store::PermissionStore;

/// Cache key prefix for role-set permission unions.
const UNION_CACHE_PREFIX: &str = "rbac:union:";

/// Evaluates role-based permission checks.
#[derive(Clone)]
pub struct RbacEvaluator {
    /// Permission assignments.
    permissions: Arc<dyn PermissionStore>,
    /// Cache for permission unions per role-set.
    cache: Arc<dyn CacheProvider>,
    /// Union cache TTL. Bounds how long a role/permission mutation can go
    /// unobserved; revocation state is never cached here.
    cache_ttl: Duration,
}

impl std::fmt::Debug for RbacEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacEvaluator")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl RbacEvaluator {
    /// Creates a new evaluator.
    pub fn new(
        permissions: Arc<dyn PermissionStore>,
        cache: Arc<dyn CacheProvider>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            permissions,
            cache,
            cache_ttl,
        }
    }

    /// Checks whether the subject may perform `action` on `resource`.
    ///
    /// Returns `Ok(())` if allowed, `Err(InsufficientPermissions)` if not.
    pub async fn authorize(
        &self,
        subject: &Subject,
        resource: &str,
        action: &str,
    ) -> Result<(), AppError> {
        if self.is_allowed(subject, resource, action).await? {
            Ok(())
        } else {
            Err(AppError::insufficient_permissions(format!(
                "Not permitted to {action} {resource}"
            )))
        }
    }

    /// Boolean form of [`Self::authorize`].
    pub async fn is_allowed(
        &self,
        subject: &Subject,
        resource: &str,
        action: &str,
    ) -> Result<bool, AppError> {
        if subject.is_super_admin() {
            return Ok(true);
        }

        let union = self.permission_union(&subject.roles).await?;
        Ok(union.contains(&Permission::new(resource, action)))
    }

    /// Drops every cached union. Call after any role/permission mutation.
    pub async fn invalidate(&self) -> Result<u64, AppError> {
        let dropped = self.cache.delete_prefix(UNION_CACHE_PREFIX).await?;
        debug!(dropped, "Invalidated permission union cache");
        Ok(dropped)
    }

    /// The union of permissions across the given roles, cached per sorted
    /// role-set.
    async fn permission_union(&self, roles: &[RoleName]) -> Result<HashSet<Permission>, AppError> {
        let key = union_cache_key(roles);

        if let Some(cached) = self.cache.get(&key).await? {
            let union: Vec<Permission> = serde_json::from_str(&cached)?;
            return Ok(union.into_iter().collect());
        }

        let mut union = HashSet::new();
        for role in roles {
            union.extend(self.permissions.permissions_for_role(*role).await?);
        }

        let serialized = serde_json::to_string(&union.iter().collect::<Vec<_>>())?;
        self.cache.set(&key, &serialized, self.cache_ttl).await?;

        Ok(union)
    }
}

/// Deterministic cache key for a role-set: sorted, deduplicated role names.
fn union_cache_key(roles: &[RoleName]) -> String {
    let mut names: Vec<&str> = roles.iter().map(RoleName::as_str).collect();
    names.sort_unstable();
    names.dedup();
    format!("{UNION_CACHE_PREFIX}{}", names.join("+"))
}
