//! Storage traits for subjects and refresh sessions.
//!
//! The Postgres repositories implement these traits directly; the in-memory
//! implementations in [`super::memory`] back single-node tests and local
//! development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use fleetgate_core::result::AppResult;
use fleetgate_database::repositories::session::SessionRepository;
use fleetgate_database::repositories::subject::SubjectRepository;
use fleetgate_entity::session::RefreshSession;
use fleetgate_entity::subject::SubjectAccount;

/// Lookup of stored subject accounts.
#[async_trait]
pub trait SubjectStore: Send + Sync + std::fmt::Debug {
    /// Find an account by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<SubjectAccount>>;

    /// Find an account by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubjectAccount>>;
}

/// Persistence of refresh session state.
///
/// `consume` is the contended operation: implementations must guarantee that
/// of any number of concurrent calls for the same session, exactly one
/// returns `true`.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Create a session row.
    async fn create(
        &self,
        subject_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        rotated_from: Option<Uuid>,
    ) -> AppResult<RefreshSession>;

    /// Find a session by token hash, in any state.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>>;

    /// Atomically mark a session consumed. Returns `true` only for the call
    /// that transitioned it from active.
    async fn consume(&self, session_id: Uuid) -> AppResult<bool>;

    /// Revoke a single active session.
    async fn revoke(&self, session_id: Uuid, reason: &str) -> AppResult<bool>;

    /// Revoke every unrevoked session of a subject. Returns the count.
    async fn revoke_all_for_subject(&self, subject_id: Uuid, reason: &str) -> AppResult<u64>;
}

#[async_trait]
impl SubjectStore for SubjectRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<SubjectAccount>> {
        SubjectRepository::find_by_email(self, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubjectAccount>> {
        SubjectRepository::find_by_id(self, id).await
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn create(
        &self,
        subject_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        rotated_from: Option<Uuid>,
    ) -> AppResult<RefreshSession> {
        SessionRepository::create(self, subject_id, token_hash, expires_at, rotated_from).await
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        SessionRepository::find_by_token_hash(self, token_hash).await
    }

    async fn consume(&self, session_id: Uuid) -> AppResult<bool> {
        SessionRepository::consume(self, session_id).await
    }

    async fn revoke(&self, session_id: Uuid, reason: &str) -> AppResult<bool> {
        SessionRepository::revoke(self, session_id, reason).await
    }

    async fn revoke_all_for_subject(&self, subject_id: Uuid, reason: &str) -> AppResult<u64> {
        SessionRepository::revoke_all_for_subject(self, subject_id, reason).await
    }
}
