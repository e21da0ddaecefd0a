//! Persistence port for portfolio content collections.

use async_trait::async_trait;

use crate::domain::portfolio::{Entry, EntryId, PortfolioEntry};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by content adapters.
    pub enum ContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "content repository query failed: {message}",
    }
}

/// Storage for one content collection.
///
/// Adapters assign identifiers and timestamps.
#[async_trait]
pub trait ContentRepository<T: PortfolioEntry>: Send + Sync {
    /// Return every entry in listing order.
    async fn list(&self) -> Result<Vec<Entry<T>>, ContentRepositoryError>;

    /// Store new content and return the created entry.
    async fn insert(&self, content: &T) -> Result<Entry<T>, ContentRepositoryError>;

    /// Replace the content of `id`, returning `None` when it does not exist.
    async fn update(
        &self,
        id: &EntryId,
        content: &T,
    ) -> Result<Option<Entry<T>>, ContentRepositoryError>;

    /// Remove `id`, returning `false` when it does not exist.
    async fn delete(&self, id: &EntryId) -> Result<bool, ContentRepositoryError>;
}
