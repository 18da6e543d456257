//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleetgate_entity::subject::{RoleName, Subject};

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<fleetgate_auth::session::TokenPair> for TokenPairResponse {
    fn from(pair: fleetgate_auth::session::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

/// Subject summary for introspection responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectResponse {
    /// Subject ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Held roles.
    pub roles: Vec<RoleName>,
    /// Team claim, if present.
    pub team_id: Option<Uuid>,
}

impl From<Subject> for SubjectResponse {
    fn from(subject: Subject) -> Self {
        Self {
            id: subject.id,
            email: subject.email,
            roles: subject.roles,
            team_id: subject.team_id,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Count of sessions revoked by logout-everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedResponse {
    /// Number of sessions revoked.
    pub revoked: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
