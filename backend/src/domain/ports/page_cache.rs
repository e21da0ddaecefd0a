//! Port for caching rendered listing pages.
//!
//! Services cache whole listing payloads as JSON under a [`PageKey`] and
//! invalidate the key after every mutation that would change the listing.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by page cache adapters.
    pub enum PageCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "page cache backend failure: {message}",
        /// Cached content could not be encoded or decoded.
        Serialization { message: String } => "page cache serialisation failed: {message}",
    }
}

/// Cache key naming one listing page.
///
/// # Examples
/// ```
/// use portfolio::domain::ports::PageKey;
///
/// assert_eq!(PageKey::admin_messages().as_str(), "admin:messages");
/// assert_eq!(PageKey::public("projects").as_str(), "public:projects");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey(String);

impl PageKey {
    /// Key of the administrator's inbox listing.
    pub fn admin_messages() -> Self {
        Self("admin:messages".to_owned())
    }

    /// Key of a public content listing.
    pub fn public(kind: &str) -> Self {
        Self(format!("public:{kind}"))
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version of one cache key, advanced by every invalidation.
///
/// A reader that missed the cache remembers the generation it saw and hands
/// it back to [`PageCache::put`]; the adapter drops the write if the key was
/// invalidated in between, so a listing read before a mutation can never
/// land in the cache after that mutation's invalidation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Generation following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup {
    /// A stored payload.
    Hit(Value),
    /// Nothing stored; the key's current generation.
    Miss(Generation),
}

/// Key/value cache of listing payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Read the cached payload for `key`.
    async fn get(&self, key: &PageKey) -> Result<PageLookup, PageCacheError>;

    /// Store `page` under `key` unless the key was invalidated after `seen`
    /// was observed. Returns whether the page was stored.
    async fn put(
        &self,
        key: &PageKey,
        seen: Generation,
        page: Value,
    ) -> Result<bool, PageCacheError>;

    /// Drop the cached payload for `key` and advance its generation.
    async fn invalidate(&self, key: &PageKey) -> Result<(), PageCacheError>;
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPageCache;

#[async_trait]
impl PageCache for NoOpPageCache {
    async fn get(&self, _key: &PageKey) -> Result<PageLookup, PageCacheError> {
        Ok(PageLookup::Miss(Generation::default()))
    }

    async fn put(
        &self,
        _key: &PageKey,
        _seen: Generation,
        _page: Value,
    ) -> Result<bool, PageCacheError> {
        Ok(false)
    }

    async fn invalidate(&self, _key: &PageKey) -> Result<(), PageCacheError> {
        Ok(())
    }
}
