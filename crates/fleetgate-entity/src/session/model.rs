//! Refresh session row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored refresh session.
///
/// The raw refresh token is returned to the caller exactly once; only its
/// SHA-256 hash is stored. A session is *consumed* once it has been rotated
/// or revoked; a consumed session can never authenticate another rotation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshSession {
    /// Primary key.
    pub id: Uuid,
    /// Owning subject.
    pub subject_id: Uuid,
    /// SHA-256 hash (hex) of the opaque refresh token.
    pub token_hash: String,
    /// Issuance timestamp.
    pub issued_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Set when the session is rotated; the successor row points back here
    /// via `rotated_from`.
    pub consumed_at: Option<DateTime<Utc>>,
    /// The session this one replaced, if created by rotation.
    pub rotated_from: Option<Uuid>,
    /// Whether the session has been revoked.
    pub revoked: bool,
    /// Reason recorded at revocation time.
    pub revoked_reason: Option<String>,
}

impl RefreshSession {
    /// Whether the session can still authenticate a rotation at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.consumed_at.is_none() && self.expires_at > now
    }

    /// Whether the session has been consumed (rotated or revoked).
    /// Presenting a consumed session's token is a replay.
    pub fn is_consumed(&self) -> bool {
        self.revoked || self.consumed_at.is_some()
    }
}
