//! Error types for Refollow
//!
//! All failures in the crate surface as `AppError`. Each variant carries
//! a human-readable message via `Display`, but callers are expected to
//! pattern-match variants rather than inspect message strings.

use http::StatusCode;
use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// OAuth callback `state` missing or not matching the stored CSRF
    /// nonce. Fatal to that login attempt; the user must restart login.
    #[error("Invalid state parameter - possible CSRF attack")]
    InvalidState,

    /// The token-exchange backend rejected the authorization code (400).
    /// Stale or reused codes land here.
    #[error("Invalid authorization code. Please try logging in again.")]
    InvalidAuthorizationCode,

    /// The token-exchange backend answered 5xx. Transient; the user may
    /// retry.
    #[error("Server error during authentication. Please try again later.")]
    AuthServiceUnavailable,

    /// A 401 from any API call, including an expired token. Callers tear
    /// the session down on this.
    #[error("Authentication failed. Please login again.")]
    AuthenticationFailed,

    /// 404 on a mutation target
    #[error("User {0} not found.")]
    UserNotFound(String),

    /// Any other non-2xx status from the GitHub API, propagated unmodified
    #[error("GitHub API error: HTTP {status}")]
    Api { status: StatusCode },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connect, timeout, body decode)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
