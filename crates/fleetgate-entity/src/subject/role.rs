//! Role enumeration.
//!
//! Roles form a closed set validated on parse. A misspelled role name is a
//! validation error at the edge, never a silently empty permission set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_name", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Implicit allow on every permission check.
    SuperAdmin,
    /// Full administrative access; bypasses team scoping.
    Admin,
    /// Manages vehicles, riders, and orders for their team.
    FleetManager,
    /// Creates and assigns orders.
    Dispatcher,
    /// Maintains vehicles and spare parts.
    Technician,
    /// Read-only access.
    Viewer,
}

impl RoleName {
    /// Whether this role is granted implicit allow on every RBAC check.
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Whether this role bypasses organizational scope restrictions.
    pub fn bypasses_scope(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::FleetManager => "fleet_manager",
            Self::Dispatcher => "dispatcher",
            Self::Technician => "technician",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = fleetgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "fleet_manager" => Ok(Self::FleetManager),
            "dispatcher" => Ok(Self::Dispatcher),
            "technician" => Ok(Self::Technician),
            "viewer" => Ok(Self::Viewer),
            _ => Err(fleetgate_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: super_admin, admin, fleet_manager, dispatcher, technician, viewer"
            ))),
        }
    }
}
