//! User domain types.

use webtoon_core::{Email, UserId};

/// A reader account.
///
/// This is a locally cached profile of an identity vouched for by the
/// [`IdentityProvider`](crate::services::identity::IdentityProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address; unique across users.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Whether this user may upload webtoons.
    pub is_admin: bool,
}
