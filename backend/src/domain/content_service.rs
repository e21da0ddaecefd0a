//! Portfolio content service shared by every collection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::listing_cache::{self, CachedListing};
use crate::domain::portfolio::{Entry, EntryId, PortfolioEntry};
use crate::domain::ports::{
    ContentCommand, ContentQuery, ContentRepository, ContentRepositoryError, PageCache, PageKey,
};
use crate::domain::{AdminId, Error};

/// Content service implementing [`ContentQuery`] and [`ContentCommand`] for
/// one collection.
///
/// Public listings are cached under `public:<kind>`; every successful write
/// invalidates that key.
pub struct ContentService<T, R> {
    repository: Arc<R>,
    page_cache: Arc<dyn PageCache>,
    _entry: PhantomData<fn() -> T>,
}

impl<T, R> Clone for ContentService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            page_cache: Arc::clone(&self.page_cache),
            _entry: PhantomData,
        }
    }
}

impl<T, R> ContentService<T, R> {
    /// Create a new service.
    pub fn new(repository: Arc<R>, page_cache: Arc<dyn PageCache>) -> Self {
        Self {
            repository,
            page_cache,
            _entry: PhantomData,
        }
    }
}

impl<T, R> ContentService<T, R>
where
    T: PortfolioEntry,
    R: ContentRepository<T>,
{
    fn listing_key() -> PageKey {
        PageKey::public(T::KIND.as_str())
    }

    fn map_repository_error(err: ContentRepositoryError) -> Error {
        match err {
            ContentRepositoryError::Connection { message } => Error::service_unavailable(format!(
                "{} store unavailable: {message}",
                T::KIND
            )),
            ContentRepositoryError::Query { message } => {
                Error::internal(format!("{} store error: {message}", T::KIND))
            }
        }
    }

    fn entry_not_found(id: &EntryId) -> Error {
        Error::not_found(format!("{} entry {id} not found", T::KIND))
    }

    async fn invalidate_listing(&self) {
        listing_cache::invalidate(self.page_cache.as_ref(), &Self::listing_key()).await;
    }
}

#[async_trait]
impl<T, R> ContentQuery<T> for ContentService<T, R>
where
    T: PortfolioEntry,
    R: ContentRepository<T>,
{
    async fn list(&self) -> Result<Vec<Entry<T>>, Error> {
        let key = Self::listing_key();
        let seen = match listing_cache::read(self.page_cache.as_ref(), &key).await {
            CachedListing::Hit(entries) => return Ok(entries),
            CachedListing::Miss(seen) => seen,
        };

        let entries = self
            .repository
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        listing_cache::store(self.page_cache.as_ref(), &key, seen, &entries).await;
        Ok(entries)
    }
}

#[async_trait]
impl<T, R> ContentCommand<T> for ContentService<T, R>
where
    T: PortfolioEntry,
    R: ContentRepository<T>,
{
    async fn create(&self, admin: &AdminId, form: &T::Form) -> Result<Entry<T>, Error> {
        let content = T::validate(form)?;
        let entry = self
            .repository
            .insert(&content)
            .await
            .map_err(Self::map_repository_error)?;
        info!(admin = %admin, kind = %T::KIND, entry_id = %entry.id, "content created");
        self.invalidate_listing().await;
        Ok(entry)
    }

    async fn update(
        &self,
        admin: &AdminId,
        id: &EntryId,
        form: &T::Form,
    ) -> Result<Entry<T>, Error> {
        let content = T::validate(form)?;
        let entry = self
            .repository
            .update(id, &content)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::entry_not_found(id))?;
        info!(admin = %admin, kind = %T::KIND, entry_id = %id, "content updated");
        self.invalidate_listing().await;
        Ok(entry)
    }

    async fn delete(&self, admin: &AdminId, id: &EntryId) -> Result<(), Error> {
        let found = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !found {
            return Err(Self::entry_not_found(id));
        }
        info!(admin = %admin, kind = %T::KIND, entry_id = %id, "content deleted");
        self.invalidate_listing().await;
        Ok(())
    }
}
