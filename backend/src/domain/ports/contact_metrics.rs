//! Port for counting contact submission outcomes.
//!
//! Keeps the submission service independent of the metrics backend. The
//! Prometheus adapter lives behind the `metrics` feature.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording contact metrics.
    pub enum ContactMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "contact metrics exporter failed: {message}",
    }
}

/// Final outcome of one contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionOutcomeLabel {
    /// Message persisted.
    Stored,
    /// Honeypot filled; message silently dropped.
    SpamDropped,
    /// Client exceeded its submission budget.
    RateLimited,
    /// Form failed validation.
    Invalid,
    /// Persistence failed.
    Failed,
}

impl SubmissionOutcomeLabel {
    /// Label value used by metrics exporters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::SpamDropped => "spam_dropped",
            Self::RateLimited => "rate_limited",
            Self::Invalid => "invalid",
            Self::Failed => "failed",
        }
    }
}

/// Metrics recording port for contact submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMetrics: Send + Sync {
    /// Count one submission with the given outcome.
    async fn record(&self, outcome: SubmissionOutcomeLabel) -> Result<(), ContactMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpContactMetrics;

#[async_trait]
impl ContactMetrics for NoOpContactMetrics {
    async fn record(&self, _outcome: SubmissionOutcomeLabel) -> Result<(), ContactMetricsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SubmissionOutcomeLabel::Stored, "stored")]
    #[case(SubmissionOutcomeLabel::SpamDropped, "spam_dropped")]
    #[case(SubmissionOutcomeLabel::RateLimited, "rate_limited")]
    #[case(SubmissionOutcomeLabel::Invalid, "invalid")]
    #[case(SubmissionOutcomeLabel::Failed, "failed")]
    fn labels_are_stable(#[case] outcome: SubmissionOutcomeLabel, #[case] expected: &str) {
        assert_eq!(outcome.as_str(), expected);
    }

    #[tokio::test]
    async fn noop_metrics_accept_every_outcome() {
        let metrics = NoOpContactMetrics;
        assert!(metrics.record(SubmissionOutcomeLabel::Stored).await.is_ok());
        assert!(metrics.record(SubmissionOutcomeLabel::Failed).await.is_ok());
    }

    #[test]
    fn error_constructor_accepts_str() {
        let err = ContactMetricsError::export("registry closed");
        assert_eq!(err.to_string(), "contact metrics exporter failed: registry closed");
    }
}
