//! In-memory repository adapters.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Contents are lost when the process exits.

mod contact_messages;
mod content;

pub use contact_messages::InMemoryContactMessageRepository;
pub use content::InMemoryContentRepository;
