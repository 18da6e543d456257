//! In-memory subject and session stores for single-node use and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use fleetgate_core::result::AppResult;
use fleetgate_entity::session::RefreshSession;
use fleetgate_entity::subject::SubjectAccount;

use super::store::{SessionStore, SubjectStore};

/// In-memory subject store.
#[derive(Debug, Default)]
pub struct MemorySubjectStore {
    accounts: DashMap<Uuid, SubjectAccount>,
    by_email: DashMap<String, Uuid>,
}

impl MemorySubjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account.
    pub fn insert(&self, account: SubjectAccount) {
        self.by_email.insert(account.email.clone(), account.id);
        self.accounts.insert(account.id, account);
    }
}

#[async_trait]
impl SubjectStore for MemorySubjectStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<SubjectAccount>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.accounts.get(&id).map(|a| a.clone())))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubjectAccount>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }
}

/// In-memory refresh session store.
///
/// `consume` relies on DashMap's per-entry locking: the state check and the
/// transition happen under the entry guard, so concurrent consumers of the
/// same session serialize and exactly one wins.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<Uuid, RefreshSession>,
    by_hash: DashMap<String, Uuid>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(
        &self,
        subject_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        rotated_from: Option<Uuid>,
    ) -> AppResult<RefreshSession> {
        let session = RefreshSession {
            id: Uuid::new_v4(),
            subject_id,
            token_hash: token_hash.to_string(),
            issued_at: Utc::now(),
            expires_at,
            consumed_at: None,
            rotated_from,
            revoked: false,
            revoked_reason: None,
        };

        self.by_hash.insert(token_hash.to_string(), session.id);
        self.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        Ok(self
            .by_hash
            .get(token_hash)
            .and_then(|id| self.sessions.get(&id).map(|s| s.clone())))
    }

    async fn consume(&self, session_id: Uuid) -> AppResult<bool> {
        if let Some(mut entry) = self.sessions.get_mut(&session_id) {
            if !entry.revoked && entry.consumed_at.is_none() {
                entry.consumed_at = Some(Utc::now());
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn revoke(&self, session_id: Uuid, reason: &str) -> AppResult<bool> {
        if let Some(mut entry) = self.sessions.get_mut(&session_id) {
            if !entry.revoked && entry.consumed_at.is_none() {
                entry.revoked = true;
                entry.revoked_reason = Some(reason.to_string());
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn revoke_all_for_subject(&self, subject_id: Uuid, reason: &str) -> AppResult<u64> {
        let mut revoked = 0u64;
        for mut entry in self.sessions.iter_mut() {
            if entry.subject_id == subject_id && !entry.revoked {
                entry.revoked = true;
                entry.revoked_reason = Some(reason.to_string());
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
