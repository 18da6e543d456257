//! Stateless access token validation.
//!
//! Verification never consults the session store: an access token stays
//! valid until its own expiry even if the owning refresh session has been
//! revoked in the meantime. Immediate revocation is bounded by the short
//! access TTL.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use fleetgate_core::config::AuthConfig;
use fleetgate_core::error::AppError;
use fleetgate_entity::subject::Subject;

use super::claims::Claims;

/// Validates access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.validation_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token, returning its claims.
    ///
    /// Checks signature, expiry, and claim structure. Expiry failures map to
    /// `TokenExpired`; every other failure to `InvalidToken`.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::token_expired(),
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::invalid_token("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::invalid_token("Invalid token signature")
                    }
                    _ => AppError::invalid_token(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decodes and validates an access token, returning the principal.
    pub fn verify(&self, token: &str) -> Result<Subject, AppError> {
        Ok(self.decode_access_token(token)?.to_subject())
    }
}
