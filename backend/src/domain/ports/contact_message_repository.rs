//! Persistence port for contact-form messages.
//!
//! Adapters assign the identifier and creation timestamp, and always store
//! new messages as `pending`; callers cannot choose the initial status.

use async_trait::async_trait;

use crate::domain::{ContactMessage, MessageId, NewContactMessage};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact message adapters.
    pub enum ContactMessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact message repository query failed: {message}",
    }
}

/// Storage for contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Persist a new message with `pending` status and return the stored record.
    async fn insert(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, ContactMessageRepositoryError>;

    /// Return every stored message ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactMessageRepositoryError>;

    /// Set the status of `id` to `read`.
    ///
    /// Returns `false` when no message has that identifier. Marking an
    /// already-read message succeeds without changing it.
    async fn mark_read(&self, id: &MessageId) -> Result<bool, ContactMessageRepositoryError>;

    /// Permanently remove `id`, returning `false` when it does not exist.
    async fn delete(&self, id: &MessageId) -> Result<bool, ContactMessageRepositoryError>;
}
