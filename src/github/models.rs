//! Wire models for the GitHub REST API

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A remote account as it appears in a relationship list
///
/// Immutable once fetched. Equality is by exact `login` only: logins are
/// taken verbatim from the API with no case normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub avatar_url: String,
}

impl PartialEq for UserSummary {
    fn eq(&self, other: &Self) -> bool {
        self.login == other.login
    }
}

impl Eq for UserSummary {}

/// The authenticated account, from `GET /user`
///
/// Created once per session after a successful token exchange and
/// discarded on logout.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub created_at: DateTime<Utc>,
}

/// Token exchange response from the trusted backend
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
}
