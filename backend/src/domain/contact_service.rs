//! Contact submission pipeline.
//!
//! Order matters: validation runs first so malformed input never consumes
//! rate-limit budget, then the rate limiter, then the honeypot check, and
//! only then the single persistence write. Spam is reported upstream as an
//! ordinary success.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::listing_cache;
use crate::domain::ports::{
    ContactMessageRepository, ContactMessageRepositoryError, ContactMetrics,
    ContactSubmissionCommand, PageCache, PageKey, SubmissionOutcomeLabel, SubmissionRateLimiter,
};
use crate::domain::{
    ClientKey, ContactForm, ContactSubmission, Error, MessageId, RateDecision,
};

/// Message shown when a submission is accepted (or silently dropped).
pub const CONTACT_SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

/// Message shown when a client exceeded its submission budget.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Message shown when the store could not persist a submission.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// How an accepted submission was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Persisted under the given identifier.
    Stored(MessageId),
    /// Honeypot was filled; nothing was written.
    Discarded,
}

/// Contact service implementing [`ContactSubmissionCommand`].
#[derive(Clone)]
pub struct ContactSubmissionService<R> {
    repository: Arc<R>,
    rate_limiter: Arc<dyn SubmissionRateLimiter>,
    page_cache: Arc<dyn PageCache>,
    metrics: Arc<dyn ContactMetrics>,
}

impl<R> ContactSubmissionService<R> {
    /// Create a new service.
    pub fn new(
        repository: Arc<R>,
        rate_limiter: Arc<dyn SubmissionRateLimiter>,
        page_cache: Arc<dyn PageCache>,
        metrics: Arc<dyn ContactMetrics>,
    ) -> Self {
        Self {
            repository,
            rate_limiter,
            page_cache,
            metrics,
        }
    }
}

impl<R> ContactSubmissionService<R>
where
    R: ContactMessageRepository,
{
    fn map_repository_error(err: ContactMessageRepositoryError) -> Error {
        error!(error = %err, "failed to persist contact message");
        match err {
            ContactMessageRepositoryError::Connection { .. } => {
                Error::service_unavailable(SUBMISSION_FAILED_MESSAGE)
            }
            ContactMessageRepositoryError::Query { .. } => Error::internal(SUBMISSION_FAILED_MESSAGE),
        }
    }

    async fn record(&self, outcome: SubmissionOutcomeLabel) {
        if let Err(err) = self.metrics.record(outcome).await {
            warn!(error = %err, outcome = outcome.as_str(), "failed to record contact metric");
        }
    }

    async fn invalidate_inbox(&self) {
        listing_cache::invalidate(self.page_cache.as_ref(), &PageKey::admin_messages()).await;
    }
}

#[async_trait]
impl<R> ContactSubmissionCommand for ContactSubmissionService<R>
where
    R: ContactMessageRepository,
{
    async fn submit(
        &self,
        client: &ClientKey,
        form: &ContactForm,
    ) -> Result<SubmissionOutcome, Error> {
        let submission = match ContactSubmission::try_from_form(form) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(fields = %errors, "contact form rejected");
                self.record(SubmissionOutcomeLabel::Invalid).await;
                return Err(errors.into());
            }
        };

        if self.rate_limiter.check_and_consume(client) == RateDecision::Limited {
            info!(client = client.as_str(), "contact submission rate limited");
            self.record(SubmissionOutcomeLabel::RateLimited).await;
            return Err(Error::too_many_requests(RATE_LIMITED_MESSAGE));
        }

        if submission.is_spam() {
            debug!(client = client.as_str(), "honeypot filled; dropping contact submission");
            self.record(SubmissionOutcomeLabel::SpamDropped).await;
            return Ok(SubmissionOutcome::Discarded);
        }

        let stored = match self.repository.insert(&submission.to_new_message()).await {
            Ok(stored) => stored,
            Err(err) => {
                self.record(SubmissionOutcomeLabel::Failed).await;
                return Err(Self::map_repository_error(err));
            }
        };

        info!(
            message_id = %stored.id,
            category = stored.category.as_str(),
            "contact message stored"
        );
        self.record(SubmissionOutcomeLabel::Stored).await;
        self.invalidate_inbox().await;
        Ok(SubmissionOutcome::Stored(stored.id))
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
