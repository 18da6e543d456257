//! `(resource, action)` permission pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A permission is the pair of a resource and an action on it,
/// e.g. `("vehicles", "create")`. The pair is unique system-wide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Permission {
    /// Resource name, e.g. `vehicles`, `orders`, `riders`.
    pub resource: String,
    /// Action name, e.g. `read`, `create`, `update`, `delete`.
    pub action: String,
}

impl Permission {
    /// Creates a permission pair.
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}
