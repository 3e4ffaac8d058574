//! Operator contact channel.
//!
//! Messages from the contact form are emitted as a structured event on the
//! `operator` tracing target and left as a Sentry breadcrumb. There is no
//! delivery confirmation.

use crate::error::add_breadcrumb;

/// Tracing target that operator messages are emitted on.
pub const OPERATOR_TARGET: &str = "operator";

/// A message from a visitor to the site operator.
#[derive(Debug, Clone)]
pub struct OperatorMessage {
    pub email: String,
    pub message: String,
}

impl OperatorMessage {
    /// Build a message, trimming both fields.
    #[must_use]
    pub fn new(email: &str, message: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }
}

/// Forward `message` to the operator.
pub fn forward_to_operator(message: &OperatorMessage) {
    tracing::info!(
        target: OPERATOR_TARGET,
        email = %message.email,
        message = %message.message,
        "Issue reported"
    );

    add_breadcrumb(
        "contact",
        "Operator message submitted",
        Some(&[("email", message.email.as_str())]),
    );
}
