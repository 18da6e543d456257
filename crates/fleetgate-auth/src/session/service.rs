//! Credential & token service — login, verification, refresh rotation,
//! and revocation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use fleetgate_core::config::AuthConfig;
use fleetgate_core::error::AppError;
use fleetgate_entity::subject::{Subject, SubjectAccount};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

use super::store::{SessionStore, SubjectStore};

/// Result of a successful login or refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived signed access token.
    pub access_token: String,
    /// Opaque single-use refresh token. Returned once, never persisted raw.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues, verifies, refreshes, and revokes credentials.
#[derive(Clone)]
pub struct TokenService {
    /// Access token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Access token decoder.
    jwt_decoder: Arc<JwtDecoder>,
    /// Subject account lookups.
    subjects: Arc<dyn SubjectStore>,
    /// Refresh session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        subjects: Arc<dyn SubjectStore>,
        sessions: Arc<dyn SessionStore>,
        password_hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            subjects,
            sessions,
            password_hasher,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Verifies login credentials and issues a token pair.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`;
    /// the caller cannot distinguish the two.
    pub async fn issue(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let account = match self.subjects.find_by_email(email).await? {
            Some(account) if account.active => account,
            _ => {
                warn!(email = %email, "Login failed: unknown or inactive account");
                return Err(AppError::invalid_credentials());
            }
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &account.password_hash)?;

        if !password_valid {
            warn!(subject_id = %account.id, "Login failed: password mismatch");
            return Err(AppError::invalid_credentials());
        }

        let pair = self.create_session_and_tokens(&account, None).await?;

        info!(subject_id = %account.id, "Login successful");
        Ok(pair)
    }

    /// Verifies an access token and returns the authenticated principal.
    ///
    /// Stateless fast path: signature, expiry, and claim structure only.
    /// The session store is never consulted here.
    pub fn verify(&self, access_token: &str) -> Result<Subject, AppError> {
        self.jwt_decoder.verify(access_token)
    }

    /// Exchanges a refresh token for a fresh token pair, rotating the
    /// session.
    ///
    /// Presenting an already-consumed token is treated as theft: the request
    /// fails with `ReplayDetected` and every session of the owning subject
    /// is revoked, forcing a full re-login.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let token_hash = sha256_hex(refresh_token);

        let session = self
            .sessions
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or_else(|| AppError::invalid_token("Unknown refresh token"))?;

        if session.is_consumed() {
            return self.handle_replay(session.subject_id, session.id).await;
        }

        if session.expires_at <= Utc::now() {
            return Err(AppError::invalid_token("Refresh token has expired"));
        }

        // Roles may have changed since issuance; the new access token must
        // carry the current assignment.
        let account = self
            .subjects
            .find_by_id(session.subject_id)
            .await?
            .filter(|a| a.active)
            .ok_or_else(|| AppError::invalid_token("Subject no longer exists or is inactive"))?;

        // Atomic consume: of two racing refresh calls on the same token,
        // exactly one passes this gate. The loser takes the replay path.
        if !self.sessions.consume(session.id).await? {
            return self.handle_replay(session.subject_id, session.id).await;
        }

        let pair = self
            .create_session_and_tokens(&account, Some(session.id))
            .await?;

        info!(subject_id = %account.id, session_id = %session.id, "Refresh token rotated");
        Ok(pair)
    }

    /// Revokes every session of the subject. Used on replay detection and
    /// explicit logout-everywhere.
    pub async fn revoke_all(&self, subject_id: Uuid, reason: &str) -> Result<u64, AppError> {
        let revoked = self
            .sessions
            .revoke_all_for_subject(subject_id, reason)
            .await?;
        info!(subject_id = %subject_id, revoked, reason, "Revoked all sessions");
        Ok(revoked)
    }

    /// Revokes the single session matching the presented refresh token.
    /// Idempotent: an unknown or already-consumed token is not an error.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let token_hash = sha256_hex(refresh_token);
        if let Some(session) = self.sessions.find_by_token_hash(&token_hash).await? {
            self.sessions.revoke(session.id, "Logout").await?;
            info!(subject_id = %session.subject_id, session_id = %session.id, "Logged out");
        }
        Ok(())
    }

    /// Replay path: log distinctly from ordinary auth failures and cascade
    /// revocation across the subject's sessions.
    async fn handle_replay(
        &self,
        subject_id: Uuid,
        session_id: Uuid,
    ) -> Result<TokenPair, AppError> {
        warn!(
            subject_id = %subject_id,
            session_id = %session_id,
            security_event = "refresh_token_replay",
            "Consumed refresh token presented again; revoking all sessions"
        );

        self.sessions
            .revoke_all_for_subject(subject_id, "Refresh token replay detected")
            .await?;

        Err(AppError::replay_detected())
    }

    /// Creates the refresh session row and both tokens.
    async fn create_session_and_tokens(
        &self,
        account: &SubjectAccount,
        rotated_from: Option<Uuid>,
    ) -> Result<TokenPair, AppError> {
        let refresh_token = generate_opaque_token();
        let refresh_expires_at = Utc::now() + chrono::Duration::days(self.refresh_ttl_days);

        let session = self
            .sessions
            .create(
                account.id,
                &sha256_hex(&refresh_token),
                refresh_expires_at,
                rotated_from,
            )
            .await?;

        let (access_token, access_expires_at) = self.jwt_encoder.issue_access_token(
            account.id,
            &account.email,
            &account.roles,
            account.team_id,
        )?;

        debug_assert!(access_expires_at < session.expires_at);

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at: session.expires_at,
        })
    }
}

/// Generates an opaque, URL-safe refresh token from 32 random bytes.
fn generate_opaque_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 of the input, hex-encoded. Only this hash is ever stored.
fn sha256_hex(input: &str) -> String {
    use std::fmt::Write;

    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
