//! JWT claims structure used in access tokens.
//!
//! Refresh tokens are opaque random values and never carry claims; only
//! access tokens are JWTs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleetgate_entity::subject::{RoleName, Subject};

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Login email.
    pub email: String,
    /// Roles held at issuance.
    pub roles: Vec<RoleName>,
    /// Team claim, if the subject is team-scoped.
    #[serde(rename = "teamId", skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Reconstructs the authenticated principal from the claims.
    pub fn to_subject(&self) -> Subject {
        Subject {
            id: self.sub,
            email: self.email.clone(),
            roles: self.roles.clone(),
            team_id: self.team_id,
        }
    }
}
