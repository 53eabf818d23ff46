//! Dashboard orchestration
//!
//! Joins the profile and relationship fetches, runs reconciliation over
//! the joined sets and owns the forced-logout path when a credential
//! goes dead mid-fetch.

use crate::auth::SessionManager;
use crate::error::{AppError, Result};
use crate::github::{Profile, RelationshipFetcher, UserSummary};
use crate::service::reconcile::{ReconciliationResult, reconcile};

/// Everything the authenticated dashboard renders from
#[derive(Debug, Clone)]
pub struct MyOverview {
    pub profile: Profile,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
    pub reconciliation: ReconciliationResult,
}

/// Anonymous lookup of a third-party account's public lists
#[derive(Debug, Clone)]
pub struct PublicOverview {
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
    pub reconciliation: ReconciliationResult,
}

/// Orchestrates fetch + reconcile workflows
pub struct DashboardService {
    session: SessionManager,
    fetcher: RelationshipFetcher,
}

impl DashboardService {
    pub fn new(session: SessionManager, fetcher: RelationshipFetcher) -> Self {
        Self { session, fetcher }
    }

    /// Fetch the authenticated profile and both relationship lists, then
    /// reconcile.
    ///
    /// The three requests have no ordering dependency and are issued
    /// concurrently; reconciliation needs both sets at once, so they are
    /// joined before any computation. Pagination within each list stays
    /// strictly sequential.
    ///
    /// # Errors
    /// On `AuthenticationFailed` from any leg the session is torn down
    /// before the error surfaces, returning the user to the
    /// unauthenticated state.
    pub async fn my_overview(&self) -> Result<MyOverview> {
        let (profile, followers, following) = tokio::join!(
            self.fetcher.get_profile(),
            self.fetcher.get_my_followers(),
            self.fetcher.get_my_following(),
        );

        let profile = profile.map_err(|e| self.teardown_on_auth_failure(e))?;
        let followers = followers.map_err(|e| self.teardown_on_auth_failure(e))?;
        let following = following.map_err(|e| self.teardown_on_auth_failure(e))?;

        let reconciliation = reconcile(&followers, &following);
        Ok(MyOverview {
            profile,
            followers,
            following,
            reconciliation,
        })
    }

    /// Fetch a third-party account's public lists and reconcile them.
    /// Works without any stored credential.
    pub async fn public_overview(&self, username: &str) -> Result<PublicOverview> {
        let (followers, following) = tokio::join!(
            self.fetcher.get_followers(username),
            self.fetcher.get_following(username),
        );
        let followers = followers?;
        let following = following?;

        let reconciliation = reconcile(&followers, &following);
        Ok(PublicOverview {
            followers,
            following,
            reconciliation,
        })
    }

    fn teardown_on_auth_failure(&self, error: AppError) -> AppError {
        if matches!(error, AppError::AuthenticationFailed) {
            self.session.force_logout();
        }
        error
    }
}
