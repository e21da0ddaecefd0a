//! Fixed-window throttling of contact submissions per client.
//!
//! Each client key gets a counter and the instant its window opened. A
//! window that has been open for longer than the configured length is reset
//! on the next request from that client. Once the counter reaches the limit
//! further requests are refused until the window resets; refused requests do
//! not consume budget.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use super::ports::SubmissionRateLimiter;

/// Key used when the client address cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Default number of submissions accepted per window.
pub const DEFAULT_LIMIT: u32 = 3;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Tracked clients above which expired windows are swept.
const PRUNE_THRESHOLD: usize = 1024;

/// Identity used to bucket requests, usually the remote address.
///
/// All clients without a usable address share the [`UNKNOWN_CLIENT`] bucket.
///
/// # Examples
/// ```
/// use portfolio::domain::ClientKey;
///
/// assert_eq!(ClientKey::from_optional(None).as_str(), "unknown");
/// assert_eq!(ClientKey::from_optional(Some(" ")).as_str(), "unknown");
/// assert_eq!(ClientKey::from_optional(Some("203.0.113.7")).as_str(), "203.0.113.7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    /// Build a key, falling back to the shared sentinel for blank input.
    pub fn from_optional(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Self(value.to_owned()),
            None => Self(UNKNOWN_CLIENT.to_owned()),
        }
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Result of consulting the limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request fits the budget and has been counted.
    Allowed,
    /// The client exhausted its budget for the current window.
    Limited,
}

/// Limit and window length applied to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    limit: u32,
    window: Duration,
}

impl RateLimitPolicy {
    /// Create a policy; a zero limit refuses everything.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }

    /// Requests accepted per window.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    fn window_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.window).unwrap_or(TimeDelta::MAX)
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW)
    }
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: DateTime<Utc>,
}

/// In-process fixed-window limiter.
///
/// State is shared across worker threads behind a mutex. Counters are lost
/// on restart and are not shared between instances.
pub struct FixedWindowRateLimiter {
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<ClientKey, WindowEntry>>,
}

impl FixedWindowRateLimiter {
    /// Create a limiter reading time from `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use portfolio::domain::{ClientKey, FixedWindowRateLimiter, RateDecision, RateLimitPolicy};
    /// use portfolio::domain::ports::SubmissionRateLimiter;
    ///
    /// let limiter = FixedWindowRateLimiter::new(RateLimitPolicy::default(), Arc::new(DefaultClock));
    /// let key = ClientKey::from_optional(Some("198.51.100.1"));
    /// assert_eq!(limiter.check_and_consume(&key), RateDecision::Allowed);
    /// ```
    pub fn new(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Policy applied by this limiter.
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock_entries().len()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<ClientKey, WindowEntry>> {
        // A poisoned map only means another request panicked mid-update;
        // counters are still usable.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn prune_expired(
        entries: &mut HashMap<ClientKey, WindowEntry>,
        now: DateTime<Utc>,
        window: TimeDelta,
    ) {
        let before = entries.len();
        entries.retain(|_, entry| now - entry.window_start <= window);
        tracing::debug!(
            removed = before - entries.len(),
            remaining = entries.len(),
            "pruned expired rate-limit windows"
        );
    }
}

impl SubmissionRateLimiter for FixedWindowRateLimiter {
    fn check_and_consume(&self, key: &ClientKey) -> RateDecision {
        let now = self.clock.utc();
        let window = self.policy.window_delta();
        let mut entries = self.lock_entries();

        if entries.len() >= PRUNE_THRESHOLD && !entries.contains_key(key) {
            Self::prune_expired(&mut entries, now, window);
        }

        let entry = entries.entry(key.clone()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now - entry.window_start > window {
            *entry = WindowEntry {
                count: 0,
                window_start: now,
            };
        }

        if entry.count >= self.policy.limit {
            return RateDecision::Limited;
        }

        entry.count += 1;
        RateDecision::Allowed
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::test_support::MutableClock;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid fixture time");
        Arc::new(MutableClock::new(start))
    }

    fn limiter(clock: &Arc<MutableClock>) -> FixedWindowRateLimiter {
        FixedWindowRateLimiter::new(RateLimitPolicy::default(), clock.clone())
    }

    fn key(raw: &str) -> ClientKey {
        ClientKey::from_optional(Some(raw))
    }

    #[rstest]
    fn allows_limit_then_refuses(clock: Arc<MutableClock>) {
        let limiter = limiter(&clock);
        let client = key("10.0.0.1");

        for _ in 0..DEFAULT_LIMIT {
            assert_eq!(limiter.check_and_consume(&client), RateDecision::Allowed);
        }
        assert_eq!(limiter.check_and_consume(&client), RateDecision::Limited);
        assert_eq!(limiter.check_and_consume(&client), RateDecision::Limited);
    }

    #[rstest]
    fn window_boundary_is_inclusive(clock: Arc<MutableClock>) {
        let limiter = limiter(&clock);
        let client = key("10.0.0.1");
        for _ in 0..DEFAULT_LIMIT {
            limiter.check_and_consume(&client);
        }

        clock.advance_seconds(60);
        assert_eq!(limiter.check_and_consume(&client), RateDecision::Limited);

        clock.advance_seconds(1);
        assert_eq!(limiter.check_and_consume(&client), RateDecision::Allowed);
    }

    #[rstest]
    fn clients_are_counted_independently(clock: Arc<MutableClock>) {
        let limiter = limiter(&clock);
        for _ in 0..DEFAULT_LIMIT {
            limiter.check_and_consume(&key("10.0.0.1"));
        }

        assert_eq!(
            limiter.check_and_consume(&key("10.0.0.1")),
            RateDecision::Limited
        );
        assert_eq!(
            limiter.check_and_consume(&key("10.0.0.2")),
            RateDecision::Allowed
        );
    }

    #[rstest]
    fn unknown_clients_share_one_bucket(clock: Arc<MutableClock>) {
        let limiter = FixedWindowRateLimiter::new(
            RateLimitPolicy::new(1, DEFAULT_WINDOW),
            clock.clone(),
        );

        assert_eq!(
            limiter.check_and_consume(&ClientKey::from_optional(None)),
            RateDecision::Allowed
        );
        assert_eq!(
            limiter.check_and_consume(&ClientKey::from_optional(Some(""))),
            RateDecision::Limited
        );
    }

    #[rstest]
    fn zero_limit_refuses_everything(clock: Arc<MutableClock>) {
        let limiter =
            FixedWindowRateLimiter::new(RateLimitPolicy::new(0, DEFAULT_WINDOW), clock.clone());
        assert_eq!(limiter.check_and_consume(&key("a")), RateDecision::Limited);
    }

    #[rstest]
    fn expired_windows_are_pruned_when_map_grows(clock: Arc<MutableClock>) {
        let limiter = limiter(&clock);
        for index in 0..PRUNE_THRESHOLD {
            limiter.check_and_consume(&key(&format!("10.1.{}.{}", index / 256, index % 256)));
        }
        assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD);

        clock.advance_seconds(61);
        limiter.check_and_consume(&key("192.0.2.1"));
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
