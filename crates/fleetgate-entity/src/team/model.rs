//! Team and department models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organizational team. Every team belongs to exactly one department.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    /// Primary key.
    pub id: Uuid,
    /// Team name.
    pub name: String,
    /// Owning department.
    pub department_id: Uuid,
}

/// A department grouping one or more teams.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    /// Primary key.
    pub id: Uuid,
    /// Department name.
    pub name: String,
}
