//! Driving ports for the administrator's message inbox.
//!
//! Every operation takes the authenticated [`AdminId`]; inbound adapters
//! obtain it from the session guard before calling in.

use async_trait::async_trait;

use crate::domain::{AdminId, ContactMessage, Error, MessageId};

/// Read side of the inbox.
#[async_trait]
pub trait InboxQuery: Send + Sync {
    /// Return every message, newest first.
    async fn list_messages(&self, admin: &AdminId) -> Result<Vec<ContactMessage>, Error>;
}

/// Write side of the inbox.
#[async_trait]
pub trait InboxCommand: Send + Sync {
    /// Mark `id` as read. Idempotent; fails with `not_found` for unknown ids.
    async fn mark_read(&self, admin: &AdminId, id: &MessageId) -> Result<(), Error>;

    /// Permanently delete `id`; fails with `not_found` for unknown ids.
    async fn delete_message(&self, admin: &AdminId, id: &MessageId) -> Result<(), Error>;
}
