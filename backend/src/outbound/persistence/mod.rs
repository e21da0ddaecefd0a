//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`)
//! and domain types; they hold no business rules. Connections come from a
//! `bb8` pool through `diesel-async`, and every database failure is mapped
//! to the port's own error type.
//!
//! # Example
//!
//! ```ignore
//! use portfolio::outbound::persistence::{DbPool, DieselContactMessageRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/portfolio")).await?;
//! let repo = DieselContactMessageRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_contact_message_repository;
mod diesel_content_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_message_repository::DieselContactMessageRepository;
pub use diesel_content_repository::DieselContentRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
