//! Port for throttling contact submissions per client.

use crate::domain::{ClientKey, RateDecision};

/// Admission check consulted before a submission is accepted.
///
/// Implementations count the request when they return
/// [`RateDecision::Allowed`]; a limited request does not consume budget.
/// The check is synchronous because it only touches in-process state.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionRateLimiter: Send + Sync {
    /// Decide whether `key` may submit now, recording the attempt if so.
    fn check_and_consume(&self, key: &ClientKey) -> RateDecision;
}

/// Limiter that admits everything, for tooling and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlimitedRateLimiter;

impl SubmissionRateLimiter for UnlimitedRateLimiter {
    fn check_and_consume(&self, _key: &ClientKey) -> RateDecision {
        RateDecision::Allowed
    }
}
