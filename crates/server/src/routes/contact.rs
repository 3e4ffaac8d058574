//! Contact form route handler.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::services::{OperatorMessage, forward_to_operator};

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Send a message to the site operator.
///
/// POST /contact
///
/// Always answers with a redirect home and a success notice; there is no
/// delivery confirmation.
#[instrument(skip_all)]
pub async fn submit(Form(form): Form<ContactForm>) -> Redirect {
    forward_to_operator(&OperatorMessage::new(&form.email, &form.message));
    Redirect::to("/?success=message_sent")
}
