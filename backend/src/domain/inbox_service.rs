//! Administrator inbox service.
//!
//! Serves the message listing through the page cache and invalidates the
//! cached page after every mutation. Cache failures are logged and never
//! fail the request; the repository stays the source of truth.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::listing_cache::{self, CachedListing};
use crate::domain::ports::{
    ContactMessageRepository, ContactMessageRepositoryError, InboxCommand, InboxQuery, PageCache,
    PageKey,
};
use crate::domain::{AdminId, ContactMessage, Error, MessageId, MessageStatus};

/// Count of messages still awaiting review.
pub fn unread_count(messages: &[ContactMessage]) -> usize {
    messages
        .iter()
        .filter(|message| message.status == MessageStatus::Pending)
        .count()
}

/// Inbox service implementing [`InboxQuery`] and [`InboxCommand`].
#[derive(Clone)]
pub struct InboxService<R> {
    repository: Arc<R>,
    page_cache: Arc<dyn PageCache>,
}

impl<R> InboxService<R> {
    /// Create a new service.
    pub fn new(repository: Arc<R>, page_cache: Arc<dyn PageCache>) -> Self {
        Self {
            repository,
            page_cache,
        }
    }
}

impl<R> InboxService<R>
where
    R: ContactMessageRepository,
{
    fn map_repository_error(err: ContactMessageRepositoryError) -> Error {
        match err {
            ContactMessageRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("message store unavailable: {message}"))
            }
            ContactMessageRepositoryError::Query { message } => {
                Error::internal(format!("message store error: {message}"))
            }
        }
    }

    fn message_not_found(id: &MessageId) -> Error {
        Error::not_found(format!("message {id} not found"))
    }

    async fn invalidate_listing(&self) {
        listing_cache::invalidate(self.page_cache.as_ref(), &PageKey::admin_messages()).await;
    }
}

#[async_trait]
impl<R> InboxQuery for InboxService<R>
where
    R: ContactMessageRepository,
{
    async fn list_messages(&self, admin: &AdminId) -> Result<Vec<ContactMessage>, Error> {
        let key = PageKey::admin_messages();
        let seen = match listing_cache::read(self.page_cache.as_ref(), &key).await {
            CachedListing::Hit(messages) => {
                debug!(admin = %admin, "serving inbox from cache");
                return Ok(messages);
            }
            CachedListing::Miss(seen) => seen,
        };

        let messages = self
            .repository
            .list_newest_first()
            .await
            .map_err(Self::map_repository_error)?;
        listing_cache::store(self.page_cache.as_ref(), &key, seen, &messages).await;
        Ok(messages)
    }
}

#[async_trait]
impl<R> InboxCommand for InboxService<R>
where
    R: ContactMessageRepository,
{
    async fn mark_read(&self, admin: &AdminId, id: &MessageId) -> Result<(), Error> {
        let found = self
            .repository
            .mark_read(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !found {
            return Err(Self::message_not_found(id));
        }
        info!(admin = %admin, message_id = %id, "message marked read");
        self.invalidate_listing().await;
        Ok(())
    }

    async fn delete_message(&self, admin: &AdminId, id: &MessageId) -> Result<(), Error> {
        let found = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !found {
            return Err(Self::message_not_found(id));
        }
        info!(admin = %admin, message_id = %id, "message deleted");
        self.invalidate_listing().await;
        Ok(())
    }
}
