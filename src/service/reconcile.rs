//! Relationship reconciliation
//!
//! Pure computation of the asymmetric difference between the follower
//! and following sets. Never cached; callers recompute on each use.

use std::collections::HashSet;

use crate::github::UserSummary;

/// The two disjoint mismatch lists
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconciliationResult {
    /// Accounts you follow that do not follow you back, in `following`
    /// order
    pub not_following_back: Vec<UserSummary>,
    /// Accounts following you that you do not follow, in `followers`
    /// order
    pub not_followed_back: Vec<UserSummary>,
}

/// Compute both mismatch lists in O(n + m) time and space.
///
/// Membership is keyed on the exact `login` string. Duplicate logins
/// within one input pass through unchanged.
pub fn reconcile(followers: &[UserSummary], following: &[UserSummary]) -> ReconciliationResult {
    let follower_logins: HashSet<&str> = followers.iter().map(|u| u.login.as_str()).collect();
    let following_logins: HashSet<&str> = following.iter().map(|u| u.login.as_str()).collect();

    let not_following_back = following
        .iter()
        .filter(|u| !follower_logins.contains(u.login.as_str()))
        .cloned()
        .collect();
    let not_followed_back = followers
        .iter()
        .filter(|u| !following_logins.contains(u.login.as_str()))
        .cloned()
        .collect();

    ReconciliationResult {
        not_following_back,
        not_followed_back,
    }
}
