//! GitHub REST API client surface
//!
//! Handles:
//! - Wire models (user summaries, profile, token response)
//! - De-paginated relationship retrieval
//! - Follow/unfollow mutations

mod actions;
mod fetcher;
mod models;

pub use actions::ActionGateway;
pub use fetcher::RelationshipFetcher;
pub use models::{Profile, TokenResponse, UserSummary};

/// Media type GitHub recommends for REST API v3 requests
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Pinned REST API version
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Build a request with the standard GitHub headers and an optional
/// bearer credential.
fn github_request(
    http: &reqwest::Client,
    method: reqwest::Method,
    url: &str,
    token: Option<&str>,
) -> reqwest::RequestBuilder {
    let mut request = http
        .request(method, url)
        .header(reqwest::header::ACCEPT, GITHUB_MEDIA_TYPE)
        .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    request
}
