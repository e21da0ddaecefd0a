//! In-memory `ContactMessageRepository` adapter.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{ContactMessageRepository, ContactMessageRepositoryError};
use crate::domain::{ContactMessage, MessageId, MessageStatus, NewContactMessage};

/// Contact messages held in a mutex-guarded vector.
pub struct InMemoryContactMessageRepository {
    clock: Arc<dyn Clock>,
    messages: Mutex<Vec<ContactMessage>>,
}

impl Default for InMemoryContactMessageRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryContactMessageRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.lock_messages().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_messages(&self) -> MutexGuard<'_, Vec<ContactMessage>> {
        // Every mutation is a single push or field write, so a poisoned
        // vector is still consistent.
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ContactMessageRepository for InMemoryContactMessageRepository {
    async fn insert(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, ContactMessageRepositoryError> {
        let stored = ContactMessage::pending(MessageId::random(), message.clone(), self.clock.utc());
        self.lock_messages().push(stored.clone());
        Ok(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactMessageRepositoryError> {
        let mut messages = self.lock_messages().clone();
        // Stable sort keeps later inserts first among equal timestamps.
        messages.reverse();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn mark_read(&self, id: &MessageId) -> Result<bool, ContactMessageRepositoryError> {
        let mut messages = self.lock_messages();
        match messages.iter_mut().find(|message| &message.id == id) {
            Some(message) => {
                message.status = MessageStatus::Read;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &MessageId) -> Result<bool, ContactMessageRepositoryError> {
        let mut messages = self.lock_messages();
        let before = messages.len();
        messages.retain(|message| &message.id != id);
        Ok(messages.len() != before)
    }
}
