//! Relationship list retrieval
//!
//! De-paginates GitHub collection endpoints into fully materialized
//! lists. Lists are rebuilt on every fetch; no cursor is retained and no
//! partial update ever happens.

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use super::models::{Profile, UserSummary};
use super::github_request;
use crate::auth::store::{ACCESS_TOKEN_KEY, SessionStore};
use crate::error::{AppError, Result};

/// Items requested per page. GitHub caps collection pages at 100.
const PER_PAGE: usize = 100;

/// Retrieves complete follower/following lists from paginated endpoints
pub struct RelationshipFetcher {
    store: Arc<dyn SessionStore>,
    http: Arc<reqwest::Client>,
    api_base: String,
}

impl RelationshipFetcher {
    pub fn new(store: Arc<dyn SessionStore>, http: Arc<reqwest::Client>, api_base: &str) -> Self {
        Self {
            store,
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch every page of a collection endpoint.
    ///
    /// Requests fixed-size pages sequentially starting at page 1 and
    /// stops on the first short page. A collection whose size is an exact
    /// multiple of the page size costs one extra request that returns an
    /// empty page before termination is detected; that trailing round
    /// trip is expected behavior.
    ///
    /// # Errors
    /// Any 401 aborts the whole fetch with `AuthenticationFailed` (the
    /// caller is expected to log the session out). Other non-2xx statuses
    /// propagate as `Api`; no retry, no backoff.
    async fn fetch_all(&self, endpoint: &str, use_auth: bool) -> Result<Vec<UserSummary>> {
        let url = format!("{}{}", self.api_base, endpoint);
        let mut all = Vec::new();
        let mut page: u32 = 1;

        loop {
            // Token is re-read per request; the session manager may have
            // torn it down since the previous page.
            let token = if use_auth {
                self.store.get(ACCESS_TOKEN_KEY)
            } else {
                None
            };

            let response = github_request(&self.http, Method::GET, &url, token.as_deref())
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())])
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!(endpoint, page, "Fetch aborted: credential rejected");
                return Err(AppError::AuthenticationFailed);
            }
            if !status.is_success() {
                return Err(AppError::Api { status });
            }

            let batch: Vec<UserSummary> = response.json().await?;
            let full_page = batch.len() == PER_PAGE;
            all.extend(batch);

            if !full_page {
                break;
            }
            page += 1;
        }

        tracing::debug!(endpoint, items = all.len(), pages = page, "Collection fetched");
        Ok(all)
    }

    /// `GET /users/{username}/followers` — public, no credential
    pub async fn get_followers(&self, username: &str) -> Result<Vec<UserSummary>> {
        self.fetch_all(&format!("/users/{}/followers", username), false)
            .await
    }

    /// `GET /users/{username}/following` — public, no credential
    pub async fn get_following(&self, username: &str) -> Result<Vec<UserSummary>> {
        self.fetch_all(&format!("/users/{}/following", username), false)
            .await
    }

    /// `GET /user/followers` — the authenticated account's followers
    pub async fn get_my_followers(&self) -> Result<Vec<UserSummary>> {
        self.fetch_all("/user/followers", true).await
    }

    /// `GET /user/following` — the authenticated account's following list
    pub async fn get_my_following(&self) -> Result<Vec<UserSummary>> {
        self.fetch_all("/user/following", true).await
    }

    /// `GET /user` — the authenticated profile
    ///
    /// # Errors
    /// `AuthenticationFailed` on 401, `Api` for other non-2xx statuses.
    pub async fn get_profile(&self) -> Result<Profile> {
        let token = self.store.get(ACCESS_TOKEN_KEY);
        let url = format!("{}/user", self.api_base);

        let response = github_request(&self.http, Method::GET, &url, token.as_deref())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::AuthenticationFailed);
        }
        if !status.is_success() {
            return Err(AppError::Api { status });
        }

        Ok(response.json().await?)
    }
}
