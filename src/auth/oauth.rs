//! GitHub OAuth flow
//!
//! Implements the client side of the OAuth 2.0 authorization code flow.
//! The code-for-token exchange goes through a trusted backend so the
//! client secret never reaches this process.

use std::sync::Arc;

use rand::RngCore;
use url::Url;

use super::store::{ACCESS_TOKEN_KEY, CSRF_STATE_KEY, SessionStore};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::github::TokenResponse;

/// Session state recovered from a landing URL
///
/// The authorization redirect leaves the application entirely; when the
/// provider sends the user agent back, the only evidence of the pending
/// handshake is the `code`/`state` pair in the landing URL. Classifying
/// that URL makes the state machine explicit and the flow resumable
/// across a full reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No token, no pending callback
    Idle,
    /// Landing URL carries an authorization callback to complete
    PendingCallback { code: String, state: String },
    /// A bearer token is already stored
    Authenticated,
    /// The provider sent the user back with an error instead of a code
    /// (e.g. `error=access_denied`)
    Failed { reason: String },
}

/// Manages the OAuth handshake and the bearer credential's lifecycle
///
/// State machine: `Idle -> (authorize_url + redirect) -> PendingCallback
/// -> (complete_login) -> Authenticated -> (logout | 401) -> Idle`.
pub struct SessionManager {
    config: Arc<AppConfig>,
    store: Arc<dyn SessionStore>,
    http: Arc<reqwest::Client>,
}

impl SessionManager {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn SessionStore>,
        http: Arc<reqwest::Client>,
    ) -> Self {
        Self {
            config,
            store,
            http,
        }
    }

    /// Build the GitHub authorization URL and arm the CSRF nonce.
    ///
    /// # Steps
    /// 1. Generate a 16-byte random nonce, hex-encoded
    /// 2. Store the nonce under the CSRF key (single use)
    /// 3. Return the authorize URL with client_id, response_type=code,
    ///    scope, redirect_uri and the nonce as `state`
    ///
    /// The caller performs the actual navigation.
    ///
    /// # Errors
    /// `Config` if no client ID is configured; nothing is stored in that
    /// case.
    pub fn authorize_url(&self) -> Result<Url> {
        let client_id = self.config.github.client_id.trim();
        if client_id.is_empty() {
            return Err(AppError::Config(
                "GitHub Client ID not configured".to_string(),
            ));
        }

        let state = generate_csrf_state();
        self.store.set(CSRF_STATE_KEY, &state);

        let mut url = Url::parse(&self.config.github.authorize_url)
            .map_err(|e| AppError::Config(format!("github.authorize_url is invalid: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.github.scope)
            .append_pair("redirect_uri", &self.config.github.redirect_uri)
            .append_pair("state", &state);

        tracing::debug!("Authorization URL prepared");
        Ok(url)
    }

    /// Complete the callback leg of the login.
    ///
    /// # Steps
    /// 1. Verify `returned_state` against the stored nonce
    /// 2. Delete the nonce (single use, before any network traffic)
    /// 3. Exchange the code at the trusted backend
    /// 4. Persist the bearer token
    ///
    /// # Errors
    /// - `InvalidState` if the nonce is absent or mismatched; the backend
    ///   is never contacted in that case
    /// - `InvalidAuthorizationCode` on backend 400
    /// - `AuthServiceUnavailable` on backend 5xx
    /// - `AuthenticationFailed` for any other exchange failure
    pub async fn complete_login(&self, code: &str, returned_state: &str) -> Result<TokenResponse> {
        match self.store.get(CSRF_STATE_KEY) {
            Some(ref stored) if stored == returned_state => {}
            _ => return Err(AppError::InvalidState),
        }
        self.store.delete(CSRF_STATE_KEY);

        let endpoint = format!(
            "{}/api/oauth-token",
            self.config.backend.base_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(&endpoint)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await
            .map_err(|error| {
                tracing::error!(%error, "Token exchange request failed");
                AppError::AuthenticationFailed
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(AppError::InvalidAuthorizationCode);
        }
        if status.is_server_error() {
            return Err(AppError::AuthServiceUnavailable);
        }
        if !status.is_success() {
            tracing::error!(%status, "Unexpected token exchange response");
            return Err(AppError::AuthenticationFailed);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| AppError::AuthenticationFailed)?;

        if !token.access_token.is_empty() {
            self.store.set(ACCESS_TOKEN_KEY, &token.access_token);
            tracing::info!("GitHub access token stored");
        }

        Ok(token)
    }

    /// True iff a bearer token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.store.get(ACCESS_TOKEN_KEY).is_some()
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// Delete the bearer token and any residual nonce. Idempotent.
    pub fn logout(&self) {
        self.store.delete(ACCESS_TOKEN_KEY);
        self.store.delete(CSRF_STATE_KEY);
        tracing::info!("User logged out");
    }

    /// Teardown path for a dead credential.
    ///
    /// Invoked when any API call answers 401, so the user lands back in
    /// the unauthenticated state instead of looping on an expired token.
    pub fn force_logout(&self) {
        tracing::warn!("Forcing logout after authentication failure");
        self.logout();
    }

    /// Classify a landing URL into an explicit session state.
    ///
    /// A `code`/`state` query pair means an authorization callback is
    /// pending; otherwise the stored token decides between
    /// `Authenticated` and `Idle`.
    pub fn resume_session(&self, url: &Url) -> SessionState {
        let mut code = None;
        let mut state = None;
        let mut error = None;
        let mut error_description = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "error_description" => error_description = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            return SessionState::Failed {
                reason: error_description.unwrap_or(error),
            };
        }
        if let (Some(code), Some(state)) = (code, state) {
            return SessionState::PendingCallback { code, state };
        }
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Idle
        }
    }
}

/// Generate a random CSRF state token (16 bytes, hex-encoded)
fn generate_csrf_state() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
