//! GitHub OAuth authentication
//!
//! Handles:
//! - The authorization-code handshake (CSRF nonce included)
//! - Bearer token lifecycle
//! - Session state recovery from a landing URL

mod oauth;
pub mod store;

pub use oauth::{SessionManager, SessionState};
pub use store::{ACCESS_TOKEN_KEY, CSRF_STATE_KEY, MemoryStore, SessionStore};
