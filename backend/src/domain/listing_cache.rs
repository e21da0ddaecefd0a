//! Listing reads and writes through the page cache.
//!
//! Cache failures are logged and treated as misses; the repository stays
//! the source of truth. A listing fetched after a miss is stored with the
//! generation observed at that miss, so a concurrent invalidation wins.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::ports::{Generation, PageCache, PageKey, PageLookup};

/// Outcome of reading a listing from the cache.
pub(crate) enum CachedListing<T> {
    /// The cached listing.
    Hit(Vec<T>),
    /// No usable page. Carries the generation to store under, or `None`
    /// when the cache could not be read and the fresh listing should not be
    /// written back.
    Miss(Option<Generation>),
}

pub(crate) async fn read<T: DeserializeOwned>(
    cache: &dyn PageCache,
    key: &PageKey,
) -> CachedListing<T> {
    let page = match cache.get(key).await {
        Ok(PageLookup::Hit(page)) => page,
        Ok(PageLookup::Miss(generation)) => return CachedListing::Miss(Some(generation)),
        Err(err) => {
            warn!(error = %err, %key, "page cache read failed");
            return CachedListing::Miss(None);
        }
    };
    match serde_json::from_value(page) {
        Ok(entries) => CachedListing::Hit(entries),
        Err(err) => {
            warn!(error = %err, %key, "discarding undecodable cached page");
            invalidate(cache, key).await;
            CachedListing::Miss(None)
        }
    }
}

pub(crate) async fn store<T: Serialize>(
    cache: &dyn PageCache,
    key: &PageKey,
    seen: Option<Generation>,
    entries: &[T],
) {
    let Some(seen) = seen else {
        return;
    };
    let page = match serde_json::to_value(entries) {
        Ok(page) => page,
        Err(err) => {
            warn!(error = %err, %key, "failed to encode listing for cache");
            return;
        }
    };
    match cache.put(key, seen, page).await {
        Ok(true) => {}
        Ok(false) => debug!(%key, "listing changed while loading; not caching"),
        Err(err) => warn!(error = %err, %key, "page cache write failed"),
    }
}

pub(crate) async fn invalidate(cache: &dyn PageCache, key: &PageKey) {
    if let Err(err) = cache.invalidate(key).await {
        warn!(error = %err, %key, "page cache invalidation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPageCache, PageCacheError};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn undecodable_page_is_dropped_and_not_rewritten() {
        let key = PageKey::admin_messages();
        let mut cache = MockPageCache::new();
        cache
            .expect_get()
            .returning(|_| Ok(PageLookup::Hit(json!({"not": "a list"}))));
        cache.expect_invalidate().times(1).returning(|_| Ok(()));
        cache.expect_put().never();

        let listing = read::<u32>(&cache, &key).await;
        let CachedListing::Miss(seen) = listing else {
            panic!("undecodable page must read as a miss");
        };
        store(&cache, &key, seen, &[1_u32, 2]).await;
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_cache_skips_write_back() {
        let key = PageKey::public("projects");
        let mut cache = MockPageCache::new();
        cache
            .expect_get()
            .returning(|_| Err(PageCacheError::backend("down")));
        cache.expect_put().never();

        let listing = read::<u32>(&cache, &key).await;
        assert!(matches!(listing, CachedListing::Miss(None)));
        if let CachedListing::Miss(seen) = listing {
            store(&cache, &key, seen, &[7_u32]).await;
        }
    }

    #[rstest]
    #[tokio::test]
    async fn miss_writes_back_with_observed_generation() {
        let key = PageKey::public("skills");
        let observed = Generation::default().next();
        let mut cache = MockPageCache::new();
        cache
            .expect_get()
            .returning(move |_| Ok(PageLookup::Miss(observed)));
        cache
            .expect_put()
            .withf(move |_, seen, page| *seen == observed && *page == json!([3]))
            .times(1)
            .returning(|_, _, _| Ok(false));

        let CachedListing::Miss(seen) = read::<u32>(&cache, &key).await else {
            panic!("expected a miss");
        };
        store(&cache, &key, seen, &[3_u32]).await;
    }
}
