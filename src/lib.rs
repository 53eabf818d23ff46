//! Refollow - GitHub follower/following reconciliation client
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Presentation (caller-owned)                  │
//! │  - renders the two mismatch lists                           │
//! │  - performs the OAuth redirect navigation                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - reconcile (pure symmetric difference)                    │
//! │  - dashboard (concurrent fetch join + forced logout)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   GitHub Client Layer                        │
//! │  - relationship fetcher (de-pagination)                     │
//! │  - action gateway (follow/unfollow)                         │
//! │  - session manager (OAuth handshake, token lifecycle)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `auth`: OAuth handshake, session store and token lifecycle
//! - `github`: REST API models, relationship fetcher, action gateway
//! - `service`: reconciliation and dashboard orchestration
//! - `config`: Configuration management
//! - `error`: Error types

pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod service;

use std::sync::Arc;

use auth::{MemoryStore, SessionManager, SessionStore};
use github::{ActionGateway, RelationshipFetcher};
use service::DashboardService;

/// Application state shared by every component
///
/// Holds the configuration, the session store and one shared HTTP
/// client. All state is ephemeral; dropping the state ends the session.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Session-scoped key/value storage (token + CSRF nonce)
    pub store: Arc<dyn SessionStore>,

    /// HTTP client shared by all API calls
    pub http_client: Arc<reqwest::Client>,
}

impl AppState {
    /// Initialize application state with the default in-memory session
    /// store.
    pub fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Initialize application state with an injected session store.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_store(
        config: config::AppConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, error::AppError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("Refollow/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.http.timeout_seconds))
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        tracing::debug!("Application state initialized");

        Ok(Self {
            config: Arc::new(config),
            store,
            http_client: Arc::new(http_client),
        })
    }

    /// Session manager bound to this state's store and config
    pub fn session(&self) -> SessionManager {
        SessionManager::new(
            self.config.clone(),
            self.store.clone(),
            self.http_client.clone(),
        )
    }

    /// Relationship fetcher for the configured API base
    pub fn fetcher(&self) -> RelationshipFetcher {
        RelationshipFetcher::new(
            self.store.clone(),
            self.http_client.clone(),
            &self.config.github.api_base,
        )
    }

    /// Action gateway for follow/unfollow mutations
    pub fn actions(&self) -> ActionGateway {
        ActionGateway::new(
            self.store.clone(),
            self.http_client.clone(),
            &self.config.github.api_base,
        )
    }

    /// Dashboard orchestration over this state's session and fetcher
    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.session(), self.fetcher())
    }
}
