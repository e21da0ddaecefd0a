//! In-process page cache adapter.
//!
//! Implements the `PageCache` port with a mutex-guarded map. Each key keeps
//! a generation that invalidation advances; writes carrying an older
//! generation are dropped. Entries also expire after a fixed lifetime, which
//! bounds how long one instance can serve a listing that another instance
//! has since changed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{Generation, PageCache, PageCacheError, PageKey, PageLookup};

/// Lifetime of a cached page.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct CachedPage {
    page: Value,
    stored_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: Generation,
    cached: Option<CachedPage>,
}

/// Page cache backed by a process-local map.
pub struct InMemoryPageCache {
    slots: Mutex<HashMap<PageKey, Slot>>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl InMemoryPageCache {
    /// Create an empty cache whose pages live for [`DEFAULT_PAGE_TTL`].
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, DEFAULT_PAGE_TTL)
    }

    /// Create an empty cache with a custom page lifetime.
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    fn lock_slots(&self) -> Result<MutexGuard<'_, HashMap<PageKey, Slot>>, PageCacheError> {
        self.slots
            .lock()
            .map_err(|_| PageCacheError::backend("page cache mutex poisoned"))
    }

    fn is_fresh(&self, cached: &CachedPage, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(cached.stored_at) < self.ttl
    }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
    async fn get(&self, key: &PageKey) -> Result<PageLookup, PageCacheError> {
        let now = self.clock.utc();
        let mut slots = self.lock_slots()?;
        let Some(slot) = slots.get_mut(key) else {
            return Ok(PageLookup::Miss(Generation::default()));
        };
        if let Some(cached) = slot.cached.as_ref().filter(|c| self.is_fresh(c, now)) {
            return Ok(PageLookup::Hit(cached.page.clone()));
        }
        slot.cached = None;
        Ok(PageLookup::Miss(slot.generation))
    }

    async fn put(
        &self,
        key: &PageKey,
        seen: Generation,
        page: Value,
    ) -> Result<bool, PageCacheError> {
        let stored_at = self.clock.utc();
        let mut slots = self.lock_slots()?;
        let slot = slots.entry(key.clone()).or_default();
        if slot.generation != seen {
            return Ok(false);
        }
        slot.cached = Some(CachedPage { page, stored_at });
        Ok(true)
    }

    async fn invalidate(&self, key: &PageKey) -> Result<(), PageCacheError> {
        let mut slots = self.lock_slots()?;
        let slot = slots.entry(key.clone()).or_default();
        slot.generation = slot.generation.next();
        slot.cached = None;
        Ok(())
    }
}
