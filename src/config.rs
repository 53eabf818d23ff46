//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub backend: BackendConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// GitHub OAuth app and API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// OAuth app client ID. Empty means login is unavailable; public
    /// lookups still work.
    #[serde(default)]
    pub client_id: String,
    /// Authorization endpoint
    pub authorize_url: String,
    /// REST API base URL (no trailing slash)
    pub api_base: String,
    /// Scopes requested during authorization
    pub scope: String,
    /// Redirect URI registered with the OAuth app (the app's own origin)
    #[serde(default)]
    pub redirect_uri: String,
}

/// Trusted backend performing the code-for-token exchange
///
/// The exchange never goes directly to the OAuth provider's token
/// endpoint; the client secret lives only on this backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. "https://backend.example.com"
    #[serde(default)]
    pub base_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (REFOLLOW_*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("github.authorize_url", "https://github.com/login/oauth/authorize")?
            .set_default("github.api_base", "https://api.github.com")?
            .set_default("github.scope", "user:follow,read:user")?
            .set_default("http.timeout_seconds", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (REFOLLOW_*)
            .add_source(
                Environment::with_prefix("REFOLLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        use url::Url;

        Url::parse(&self.github.authorize_url).map_err(|e| {
            crate::error::AppError::Config(format!("github.authorize_url is invalid: {}", e))
        })?;
        Url::parse(&self.github.api_base).map_err(|e| {
            crate::error::AppError::Config(format!("github.api_base is invalid: {}", e))
        })?;

        if self.http.timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "http.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        // Login requires the full OAuth surface to be configured together.
        if !self.github.client_id.trim().is_empty() {
            if self.github.redirect_uri.trim().is_empty() {
                return Err(crate::error::AppError::Config(
                    "github.redirect_uri is required when github.client_id is set".to_string(),
                ));
            }
            if self.backend.base_url.trim().is_empty() {
                return Err(crate::error::AppError::Config(
                    "backend.base_url is required when github.client_id is set".to_string(),
                ));
            }
        }

        Ok(())
    }
}
