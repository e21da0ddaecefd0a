//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::portfolio::PortfolioEntry;
use crate::domain::ports::{NoOpContactMetrics, PageCache};
use crate::domain::{
    ConfiguredLoginService, ContactSubmissionService, ContentService, FixedWindowRateLimiter,
    InboxService, RateLimitPolicy,
};
use crate::inbound::http::state::{ContentPorts, ContentState, HttpState, HttpStatePorts};
use crate::outbound::cache::InMemoryPageCache;
use crate::outbound::memory::{InMemoryContactMessageRepository, InMemoryContentRepository};

/// Clock whose current instant is set and advanced by the test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Username accepted by [`InMemoryBackend`]'s login service.
pub const ADMIN_USERNAME: &str = "admin";
/// Password accepted by [`InMemoryBackend`]'s login service.
pub const ADMIN_PASSWORD: &str = "password";
// sha256("password")
const ADMIN_PASSWORD_SHA256: &str =
    "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

/// Fully wired HTTP state over in-memory adapters.
///
/// Handles to the clock, message store and cache stay available so tests can
/// advance time and inspect what was persisted.
pub struct InMemoryBackend {
    pub clock: Arc<MutableClock>,
    pub messages: Arc<InMemoryContactMessageRepository>,
    pub page_cache: Arc<InMemoryPageCache>,
    pub state: HttpState,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}

impl InMemoryBackend {
    /// Wire every port with the given contact rate-limit policy.
    pub fn new(policy: RateLimitPolicy) -> Self {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let messages = Arc::new(InMemoryContactMessageRepository::new(shared_clock.clone()));
        let page_cache = Arc::new(InMemoryPageCache::new(shared_clock.clone()));
        let cache: Arc<dyn PageCache> = page_cache.clone();

        let contact = ContactSubmissionService::new(
            messages.clone(),
            Arc::new(FixedWindowRateLimiter::new(policy, shared_clock.clone())),
            cache.clone(),
            Arc::new(NoOpContactMetrics),
        );
        let inbox = Arc::new(InboxService::new(messages.clone(), cache.clone()));
        let login = match ConfiguredLoginService::new(ADMIN_USERNAME, ADMIN_PASSWORD_SHA256) {
            Ok(login) => login,
            Err(error) => panic!("fixture admin account: {error}"),
        };

        let state = HttpState::new(
            HttpStatePorts {
                login: Arc::new(login),
                contact: Arc::new(contact),
                inbox_query: inbox.clone(),
                inbox,
            },
            ContentState {
                projects: content_ports(&shared_clock, &cache),
                skills: content_ports(&shared_clock, &cache),
                experiences: content_ports(&shared_clock, &cache),
                certificates: content_ports(&shared_clock, &cache),
            },
        );

        Self {
            clock,
            messages,
            page_cache,
            state,
        }
    }
}

fn content_ports<T: PortfolioEntry>(
    clock: &Arc<dyn Clock>,
    cache: &Arc<dyn PageCache>,
) -> ContentPorts<T> {
    let repository = Arc::new(InMemoryContentRepository::<T>::new(clock.clone()));
    ContentPorts::from_service(Arc::new(ContentService::new(repository, cache.clone())))
}
