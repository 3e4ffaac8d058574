//! Identity issuance.
//!
//! A sign-in asks an [`IdentityProvider`] to vouch for an email address and
//! then resolves that identity to a cached profile in the `users` table. The
//! provider is the authority on admin rights; the cached flag is refreshed on
//! every sign-in.

use std::future::Future;

use sqlx::SqlitePool;
use thiserror::Error;

use webtoon_core::Email;

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Display name given to profiles created through the mock provider.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Errors that can occur while signing in.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider refused to vouch for the address.
    #[error("identity rejected: {0}")]
    Rejected(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// What a provider asserts about an address it vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: Email,
    pub name: String,
    pub is_admin: bool,
}

/// An external authority that vouches for email addresses.
pub trait IdentityProvider: Send + Sync {
    /// Vouch for `email`, or refuse.
    fn verify(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<VerifiedIdentity, IdentityError>> + Send;
}

/// Stand-in provider: accepts any address and grants admin to exactly one.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    admin_email: Email,
}

impl MockIdentityProvider {
    #[must_use]
    pub const fn new(admin_email: Email) -> Self {
        Self { admin_email }
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn verify(&self, email: &Email) -> Result<VerifiedIdentity, IdentityError> {
        Ok(VerifiedIdentity {
            email: email.clone(),
            name: DEFAULT_DISPLAY_NAME.to_string(),
            is_admin: *email == self.admin_email,
        })
    }
}

/// Sign in `email`: verify it with `provider`, then find or create the user.
///
/// An existing user is reused; if the provider's admin assertion differs from
/// the cached flag, the flag is overwritten.
///
/// # Errors
///
/// Returns `IdentityError::Rejected` if the provider refuses the address.
/// Returns `IdentityError::Repository` if the lookup or write fails.
pub async fn sign_in<P: IdentityProvider>(
    pool: &SqlitePool,
    provider: &P,
    email: &Email,
) -> Result<User, IdentityError> {
    let identity = provider.verify(email).await?;
    let users = UserRepository::new(pool);

    if let Some(user) = users.get_by_email(&identity.email).await? {
        return refresh_admin(&users, user, identity.is_admin).await;
    }

    match users
        .create(&identity.email, &identity.name, identity.is_admin)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, is_admin = user.is_admin, "Created user on first sign-in");
            Ok(user)
        }
        // Lost a race with a concurrent first sign-in for the same address.
        Err(RepositoryError::Conflict(_)) => {
            let user = users
                .get_by_email(&identity.email)
                .await?
                .ok_or(RepositoryError::NotFound)?;
            refresh_admin(&users, user, identity.is_admin).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn refresh_admin(
    users: &UserRepository<'_>,
    mut user: User,
    is_admin: bool,
) -> Result<User, IdentityError> {
    if user.is_admin != is_admin {
        users.set_admin(user.id, is_admin).await?;
        tracing::info!(user_id = %user.id, is_admin, "Refreshed cached admin flag");
        user.is_admin = is_admin;
    }
    Ok(user)
}
