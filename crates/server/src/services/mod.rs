//! Business logic services for the reader.
//!
//! # Services
//!
//! - `identity` - Mock identity provider and sign-in (find-or-create user)
//! - `contact` - Operator message channel for the contact form

pub mod contact;
pub mod identity;

pub use contact::{OperatorMessage, forward_to_operator};
pub use identity::{IdentityError, IdentityProvider, MockIdentityProvider, sign_in};
