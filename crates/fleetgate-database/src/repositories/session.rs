//! Refresh session repository implementation.
//!
//! Rotation safety lives here: `consume` is a conditional update that only
//! succeeds while the row is still active, so two racing refresh calls on
//! the same token resolve to exactly one winner at the database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fleetgate_core::error::{AppError, ErrorKind};
use fleetgate_core::result::AppResult;
use fleetgate_entity::session::RefreshSession;

/// Repository for refresh session rows.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new session row. `rotated_from` links a rotation successor
    /// back to the session it replaces.
    pub async fn create(
        &self,
        subject_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        rotated_from: Option<Uuid>,
    ) -> AppResult<RefreshSession> {
        sqlx::query_as::<_, RefreshSession>(
            "INSERT INTO refresh_sessions (subject_id, token_hash, expires_at, rotated_from) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(subject_id)
        .bind(token_hash)
        .bind(expires_at)
        .bind(rotated_from)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Find a session by its token hash, regardless of state. Consumed and
    /// revoked rows must stay visible so replays can be recognized.
    pub async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        sqlx::query_as::<_, RefreshSession>(
            "SELECT * FROM refresh_sessions WHERE token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
        })
    }

    /// Atomically consume a session for rotation.
    ///
    /// Returns `true` if this call won the row (it was still active),
    /// `false` if another call consumed or revoked it first.
    pub async fn consume(&self, session_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_sessions SET consumed_at = NOW() \
             WHERE id = $1 AND consumed_at IS NULL AND revoked = FALSE",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to consume session", e))?;

        Ok(result.rows_affected() == 1)
    }

    /// Revoke a single session. Revoking an already-consumed session is a
    /// no-op and reported as `false`.
    pub async fn revoke(&self, session_id: Uuid, reason: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_sessions SET revoked = TRUE, revoked_reason = $2 \
             WHERE id = $1 AND revoked = FALSE AND consumed_at IS NULL",
        )
        .bind(session_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke session", e))?;

        Ok(result.rows_affected() == 1)
    }

    /// Revoke every session belonging to a subject, including rotation
    /// successors. Returns the number of rows newly revoked.
    pub async fn revoke_all_for_subject(&self, subject_id: Uuid, reason: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_sessions SET revoked = TRUE, revoked_reason = $2 \
             WHERE subject_id = $1 AND revoked = FALSE",
        )
        .bind(subject_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke subject sessions", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Delete expired and consumed sessions older than the cutoff.
    pub async fn cleanup_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM refresh_sessions \
             WHERE expires_at < $1 OR (consumed_at IS NOT NULL AND consumed_at < $1)",
        )
        .bind(before)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cleanup sessions", e))?;

        Ok(result.rows_affected())
    }
}
