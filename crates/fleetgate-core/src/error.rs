//! Unified application error types for FleetGate.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The `ErrorKind` taxonomy mirrors the
//! wire-level error codes returned in the standard response envelope.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// The `Display` impl yields the machine-readable `code` field of the error
/// envelope, so the variants here define the external error contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Login failed. Deliberately covers both unknown email and wrong
    /// password so the two are indistinguishable to the caller.
    InvalidCredentials,
    /// A token failed signature, structure, or lookup checks.
    InvalidToken,
    /// An access token is past its expiry.
    TokenExpired,
    /// A consumed refresh token was presented again. Treated as theft.
    ReplayDetected,
    /// The subject's roles do not grant the required permission.
    InsufficientPermissions,
    /// The subject is outside the organizational scope of the resource.
    TeamAccessDenied,
    /// No gateway route matches the request path.
    RouteNotFound,
    /// A downstream service could not be reached.
    GatewayUnavailable,
    /// A downstream call exceeded the per-request timeout.
    GatewayTimeout,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Auth codes are CamelCase, infrastructure codes SCREAMING_SNAKE;
        // both are part of the published envelope contract.
        match self {
            Self::InvalidCredentials => write!(f, "InvalidCredentials"),
            Self::InvalidToken => write!(f, "InvalidToken"),
            Self::TokenExpired => write!(f, "TokenExpired"),
            Self::ReplayDetected => write!(f, "ReplayDetected"),
            Self::InsufficientPermissions => write!(f, "InsufficientPermissions"),
            Self::TeamAccessDenied => write!(f, "TeamAccessDenied"),
            Self::RouteNotFound => write!(f, "NOT_FOUND"),
            Self::GatewayUnavailable | Self::GatewayTimeout => write!(f, "GATEWAY_UNAVAILABLE"),
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout FleetGate.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a token-expired error.
    pub fn token_expired() -> Self {
        Self::new(ErrorKind::TokenExpired, "Token has expired")
    }

    /// Create a replay-detected error.
    pub fn replay_detected() -> Self {
        Self::new(
            ErrorKind::ReplayDetected,
            "Refresh token has already been used",
        )
    }

    /// Create an insufficient-permissions error.
    pub fn insufficient_permissions(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientPermissions, message)
    }

    /// Create a team-access-denied error.
    pub fn team_access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TeamAccessDenied, message)
    }

    /// Create a route-not-found error.
    pub fn route_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RouteNotFound, message)
    }

    /// Create a gateway-unavailable error.
    pub fn gateway_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GatewayUnavailable, message)
    }

    /// Create a gateway-timeout error.
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GatewayTimeout, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
