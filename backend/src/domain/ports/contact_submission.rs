//! Driving port for accepting contact-form submissions.

use async_trait::async_trait;

use crate::domain::{ClientKey, ContactForm, Error, SubmissionOutcome};

/// Use-case port called by inbound adapters for each submitted form.
///
/// A silently dropped spam submission is an `Ok` outcome; adapters must
/// report it to the client exactly like a stored one.
#[async_trait]
pub trait ContactSubmissionCommand: Send + Sync {
    /// Validate, throttle, filter and persist one submission from `client`.
    async fn submit(&self, client: &ClientKey, form: &ContactForm)
    -> Result<SubmissionOutcome, Error>;
}
