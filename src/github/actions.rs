//! Relationship mutations
//!
//! Single-shot follow/unfollow against the GitHub API. No batching and
//! no retries; each call is independent, and callers refresh the
//! relationship lists themselves afterward — nothing is cached here.

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use super::github_request;
use crate::auth::store::{ACCESS_TOKEN_KEY, SessionStore};
use crate::error::{AppError, Result};

/// Issues individual follow/unfollow mutations for the current session
pub struct ActionGateway {
    store: Arc<dyn SessionStore>,
    http: Arc<reqwest::Client>,
    api_base: String,
}

impl ActionGateway {
    pub fn new(store: Arc<dyn SessionStore>, http: Arc<reqwest::Client>, api_base: &str) -> Self {
        Self {
            store,
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// `PUT /user/following/{login}` — idempotent follow
    pub async fn follow(&self, login: &str) -> Result<()> {
        self.mutate(Method::PUT, login).await
    }

    /// `DELETE /user/following/{login}` — idempotent unfollow
    pub async fn unfollow(&self, login: &str) -> Result<()> {
        self.mutate(Method::DELETE, login).await
    }

    /// `GET /user/following/{login}` — existence check (204/404)
    pub async fn is_following(&self, login: &str) -> Result<bool> {
        let token = self.store.get(ACCESS_TOKEN_KEY);
        let url = format!("{}/user/following/{}", self.api_base, login);

        let response = github_request(&self.http, Method::GET, &url, token.as_deref())
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AppError::AuthenticationFailed),
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(AppError::Api { status }),
        }
    }

    async fn mutate(&self, method: Method, login: &str) -> Result<()> {
        let token = self.store.get(ACCESS_TOKEN_KEY);
        let url = format!("{}/user/following/{}", self.api_base, login);

        let response = github_request(&self.http, method.clone(), &url, token.as_deref())
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => Err(AppError::AuthenticationFailed),
            StatusCode::NOT_FOUND => Err(AppError::UserNotFound(login.to_string())),
            status if status.is_success() => {
                tracing::info!(%method, login, "Relationship mutation applied");
                Ok(())
            }
            status => Err(AppError::Api { status }),
        }
    }
}
