//! Driving ports for portfolio content.
//!
//! Reads are public; writes require the authenticated [`AdminId`].

use async_trait::async_trait;

use crate::domain::portfolio::{Entry, EntryId, PortfolioEntry};
use crate::domain::{AdminId, Error};

/// Public read side of a content collection.
#[async_trait]
pub trait ContentQuery<T: PortfolioEntry>: Send + Sync {
    /// Return every entry in listing order.
    async fn list(&self) -> Result<Vec<Entry<T>>, Error>;
}

/// Admin write side of a content collection.
#[async_trait]
pub trait ContentCommand<T: PortfolioEntry>: Send + Sync {
    /// Validate `form` and store it as a new entry.
    async fn create(&self, admin: &AdminId, form: &T::Form) -> Result<Entry<T>, Error>;

    /// Validate `form` and replace entry `id`; `not_found` for unknown ids.
    async fn update(&self, admin: &AdminId, id: &EntryId, form: &T::Form)
    -> Result<Entry<T>, Error>;

    /// Remove entry `id`; `not_found` for unknown ids.
    async fn delete(&self, admin: &AdminId, id: &EntryId) -> Result<(), Error>;
}
