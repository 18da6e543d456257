//! Team scope resolution.
//!
//! Restricts access to organizationally-scoped resources. The subject's
//! team id is a claim on its token, never re-fetched per request.

use uuid::Uuid;

use fleetgate_core::error::AppError;
use fleetgate_entity::subject::Subject;

/// Resolves whether a subject may act within a requested team scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    /// Creates a new scope resolver.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the subject may act on a resource scoped to
    /// `requested_team`.
    ///
    /// Bypass roles (admin, super admin) always pass. Everyone else needs a
    /// team claim equal to the requested team. A missing team on either
    /// side fails closed.
    pub fn authorize_team(
        &self,
        subject: &Subject,
        requested_team: Option<Uuid>,
    ) -> Result<(), AppError> {
        if subject.bypasses_scope() {
            return Ok(());
        }

        match (subject.team_id, requested_team) {
            (Some(own), Some(requested)) if own == requested => Ok(()),
            (Some(_), Some(_)) => Err(AppError::team_access_denied(
                "Resource belongs to another team",
            )),
            (None, _) => Err(AppError::team_access_denied(
                "No team scope on the presented token",
            )),
            (_, None) => Err(AppError::team_access_denied(
                "Request does not carry a team scope",
            )),
        }
    }
}
