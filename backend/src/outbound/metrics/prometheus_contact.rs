//! Prometheus adapter for contact submission metrics.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{ContactMetrics, ContactMetricsError, SubmissionOutcomeLabel};

/// Metric name for submission outcomes.
pub const SUBMISSIONS_TOTAL: &str = "portfolio_contact_submissions_total";

/// Prometheus-backed contact metrics recorder.
///
/// - **Name**: `portfolio_contact_submissions_total`
/// - **Type**: Counter
/// - **Labels**: `outcome` = `stored`, `spam_dropped`, `rate_limited`,
///   `invalid` or `failed`
pub struct PrometheusContactMetrics {
    submissions_total: IntCounterVec,
}

impl PrometheusContactMetrics {
    /// Create and register the counter with `registry`.
    ///
    /// # Errors
    ///
    /// Fails if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let submissions_total = IntCounterVec::new(
            Opts::new(SUBMISSIONS_TOTAL, "Contact form submissions by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(submissions_total.clone()))?;
        Ok(Self { submissions_total })
    }
}

#[async_trait]
impl ContactMetrics for PrometheusContactMetrics {
    async fn record(&self, outcome: SubmissionOutcomeLabel) -> Result<(), ContactMetricsError> {
        self.submissions_total
            .get_metric_with_label_values(&[outcome.as_str()])
            .map_err(|err| ContactMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}
