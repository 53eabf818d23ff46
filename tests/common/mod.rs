//! Common test utilities
//!
//! Provides a `TestServer` that mocks both upstreams the crate talks to
//! (the GitHub REST API and the trusted token-exchange backend) on an
//! OS-assigned port, plus an `AppState` pointed at the mock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use refollow::{AppState, config};
use tokio::net::TcpListener;

/// Mutable state behind the mock upstreams
#[derive(Default)]
struct MockData {
    public_followers: Vec<String>,
    public_following: Vec<String>,
    my_followers: Vec<String>,
    my_following: Vec<String>,
    /// Accounts that exist as mutation targets
    known_users: Vec<String>,
    /// Bearer token the mock accepts; anything else is a 401
    valid_token: Option<String>,
    /// Status the token-exchange endpoint answers with
    exchange_status: u16,
    /// Token the exchange hands out on success
    issued_token: String,
    /// Forced status for collection endpoints (overrides normal replies)
    list_status: Option<u16>,
    /// Forced status for follow/unfollow endpoints
    mutation_status: Option<u16>,
}

/// Handle to the mock upstreams, shared with handlers
#[derive(Clone)]
pub struct MockGitHub {
    data: Arc<Mutex<MockData>>,
    exchange_calls: Arc<AtomicUsize>,
    list_requests: Arc<AtomicUsize>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData {
                valid_token: Some("gho_issued".to_string()),
                exchange_status: 200,
                issued_token: "gho_issued".to_string(),
                ..MockData::default()
            })),
            exchange_calls: Arc::new(AtomicUsize::new(0)),
            list_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_public_lists(&self, followers: Vec<String>, following: Vec<String>) {
        let mut data = self.data.lock().unwrap();
        data.public_followers = followers;
        data.public_following = following;
    }

    pub fn set_my_lists(&self, followers: Vec<String>, following: Vec<String>) {
        let mut data = self.data.lock().unwrap();
        data.my_followers = followers;
        data.my_following = following;
    }

    pub fn set_known_users(&self, users: Vec<String>) {
        self.data.lock().unwrap().known_users = users;
    }

    pub fn set_valid_token(&self, token: Option<&str>) {
        self.data.lock().unwrap().valid_token = token.map(str::to_string);
    }

    pub fn set_exchange_status(&self, status: u16) {
        self.data.lock().unwrap().exchange_status = status;
    }

    pub fn set_list_status(&self, status: u16) {
        self.data.lock().unwrap().list_status = Some(status);
    }

    pub fn set_mutation_status(&self, status: u16) {
        self.data.lock().unwrap().mutation_status = Some(status);
    }

    pub fn my_following(&self) -> Vec<String> {
        self.data.lock().unwrap().my_following.clone()
    }

    /// Number of calls the token-exchange endpoint has received
    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    /// Number of collection-page requests served so far
    pub fn list_requests(&self) -> usize {
        self.list_requests.load(Ordering::SeqCst)
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/users/:username/followers", get(public_followers))
            .route("/users/:username/following", get(public_following))
            .route("/user/followers", get(my_followers))
            .route("/user/following", get(my_following))
            .route(
                "/user/following/:login",
                get(check_following).put(follow_user).delete(unfollow_user),
            )
            .route("/user", get(profile))
            .route("/api/oauth-token", post(exchange_token))
            .with_state(self.clone())
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = match &self.data.lock().unwrap().valid_token {
            Some(token) => format!("Bearer {}", token),
            None => return false,
        };
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == expected)
            .unwrap_or(false)
    }
}

/// Test server instance
pub struct TestServer {
    pub state: AppState,
    pub mock: MockGitHub,
    pub addr: String,
}

impl TestServer {
    /// Create a new mock upstream and an `AppState` configured against it
    pub async fn new() -> Self {
        let mock = MockGitHub::new();
        let app = mock.router();

        // Bind to a random port first; connections queue on the bound
        // listener even before the serve task is polled.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = config::AppConfig {
            github: config::GitHubConfig {
                client_id: "test-client-id".to_string(),
                authorize_url: "https://github.com/login/oauth/authorize".to_string(),
                api_base: addr.clone(),
                scope: "user:follow,read:user".to_string(),
                redirect_uri: "http://127.0.0.1/app".to_string(),
            },
            backend: config::BackendConfig {
                base_url: addr.clone(),
            },
            http: config::HttpConfig {
                timeout_seconds: 10,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        let state = AppState::new(config).unwrap();

        Self { state, mock, addr }
    }
}

/// Generate sequential logins like "user-0".."user-{n-1}"
pub fn logins(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}-{}", prefix, i)).collect()
}

fn summaries(page: &[String]) -> Vec<serde_json::Value> {
    page.iter()
        .map(|login| {
            serde_json::json!({
                "login": login,
                "avatar_url": format!("https://avatars.example/{}", login),
            })
        })
        .collect()
}

fn paginate(all: &[String], params: &HashMap<String, String>) -> Json<Vec<serde_json::Value>> {
    let per_page: usize = params
        .get("per_page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let page: usize = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let start = (page.saturating_sub(1)) * per_page;
    let slice: Vec<String> = all.iter().skip(start).take(per_page).cloned().collect();
    Json(summaries(&slice))
}

fn forced_status(code: Option<u16>) -> Option<Response> {
    code.map(|code| StatusCode::from_u16(code).unwrap().into_response())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "message": "Bad credentials" })),
    )
        .into_response()
}

async fn public_followers(
    State(mock): State<MockGitHub>,
    Path(_username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.list_requests.fetch_add(1, Ordering::SeqCst);
    let (forced, all) = {
        let data = mock.data.lock().unwrap();
        (data.list_status, data.public_followers.clone())
    };
    if let Some(response) = forced_status(forced) {
        return response;
    }
    paginate(&all, &params).into_response()
}

async fn public_following(
    State(mock): State<MockGitHub>,
    Path(_username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.list_requests.fetch_add(1, Ordering::SeqCst);
    let (forced, all) = {
        let data = mock.data.lock().unwrap();
        (data.list_status, data.public_following.clone())
    };
    if let Some(response) = forced_status(forced) {
        return response;
    }
    paginate(&all, &params).into_response()
}

async fn my_followers(
    State(mock): State<MockGitHub>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    mock.list_requests.fetch_add(1, Ordering::SeqCst);
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let (forced, all) = {
        let data = mock.data.lock().unwrap();
        (data.list_status, data.my_followers.clone())
    };
    if let Some(response) = forced_status(forced) {
        return response;
    }
    paginate(&all, &params).into_response()
}

async fn my_following(
    State(mock): State<MockGitHub>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    mock.list_requests.fetch_add(1, Ordering::SeqCst);
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let (forced, all) = {
        let data = mock.data.lock().unwrap();
        (data.list_status, data.my_following.clone())
    };
    if let Some(response) = forced_status(forced) {
        return response;
    }
    paginate(&all, &params).into_response()
}

async fn profile(State(mock): State<MockGitHub>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let data = mock.data.lock().unwrap();
    Json(serde_json::json!({
        "login": "testuser",
        "id": 583231,
        "avatar_url": "https://avatars.example/testuser",
        "name": "Test User",
        "bio": null,
        "followers": data.my_followers.len(),
        "following": data.my_following.len(),
        "public_repos": 8,
        "created_at": "2011-01-25T18:44:36Z",
    }))
    .into_response()
}

async fn check_following(
    State(mock): State<MockGitHub>,
    Path(login): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    if mock.data.lock().unwrap().my_following.contains(&login) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn follow_user(
    State(mock): State<MockGitHub>,
    Path(login): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let mut data = mock.data.lock().unwrap();
    if let Some(response) = forced_status(data.mutation_status) {
        return response;
    }
    if !data.known_users.contains(&login) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if !data.my_following.contains(&login) {
        data.my_following.push(login);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn unfollow_user(
    State(mock): State<MockGitHub>,
    Path(login): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let mut data = mock.data.lock().unwrap();
    if let Some(response) = forced_status(data.mutation_status) {
        return response;
    }
    if !data.known_users.contains(&login) {
        return StatusCode::NOT_FOUND.into_response();
    }
    data.my_following.retain(|l| l != &login);
    StatusCode::NO_CONTENT.into_response()
}

async fn exchange_token(State(mock): State<MockGitHub>) -> Response {
    mock.exchange_calls.fetch_add(1, Ordering::SeqCst);
    let (status, issued) = {
        let data = mock.data.lock().unwrap();
        (data.exchange_status, data.issued_token.clone())
    };

    match status {
        200 => Json(serde_json::json!({
            "access_token": issued,
            "token_type": "bearer",
            "scope": "user:follow,read:user",
        }))
        .into_response(),
        code => (
            StatusCode::from_u16(code).unwrap(),
            Json(serde_json::json!({ "error": "bad_verification_code" })),
        )
            .into_response(),
    }
}
