//! Refollow binary entry point
//!
//! Thin presentation shim over the library: looks up a GitHub account's
//! public follower/following lists and prints the reconciliation. The
//! authenticated OAuth flow is library surface for richer frontends.

use refollow::{AppState, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Initialize tracing/logging
/// 2. Load configuration from file and environment
/// 3. Initialize AppState
/// 4. Fetch and reconcile the requested account's public lists
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize tracing/logging
    let log_format =
        std::env::var("REFOLLOW__LOGGING__FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "refollow=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "refollow=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    // 2. Load configuration
    let config = config::AppConfig::load()?;
    tracing::info!(api_base = %config.github.api_base, "Configuration loaded");

    // 3. Initialize application state
    let state = AppState::new(config)?;

    // 4. Fetch and reconcile
    let username = std::env::args()
        .nth(1)
        .ok_or("usage: refollow <github-username>")?;

    tracing::info!(%username, "Fetching public relationship lists...");
    let overview = state.dashboard().public_overview(&username).await?;

    println!(
        "@{}: {} followers, {} following",
        username,
        overview.followers.len(),
        overview.following.len()
    );

    println!(
        "\nNot following back ({}):",
        overview.reconciliation.not_following_back.len()
    );
    for user in &overview.reconciliation.not_following_back {
        println!("  {}", user.login);
    }

    println!(
        "\nNot followed back ({}):",
        overview.reconciliation.not_followed_back.len()
    );
    for user in &overview.reconciliation.not_followed_back {
        println!("  {}", user.login);
    }

    Ok(())
}
