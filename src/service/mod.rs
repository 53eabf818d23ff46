//! Service layer
//!
//! Contains the pure reconciliation computation and the orchestration
//! that joins fetches before reconciling.

mod dashboard;
mod reconcile;

pub use dashboard::{DashboardService, MyOverview, PublicOverview};
pub use reconcile::{ReconciliationResult, reconcile};
