//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use webtoon_core::UserId;

/// Session-stored identity.
///
/// Only the id is kept; the user record is loaded fresh on every request so
/// that a changed admin flag takes effect immediately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionUser {
    /// User's database ID.
    pub id: UserId,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "user_id";
}
