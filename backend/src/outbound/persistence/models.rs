//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{contact_messages, portfolio_entries};

/// Row struct for reading from the contact_messages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactMessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub category: String,
    pub budget: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new contact messages.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contact_messages)]
pub(crate) struct NewContactMessageRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub category: &'a str,
    pub budget: Option<&'a str>,
    pub message: &'a str,
    pub status: &'a str,
}

/// Row struct for reading from the portfolio_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = portfolio_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PortfolioEntryRow {
    pub id: Uuid,
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new portfolio entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = portfolio_entries)]
pub(crate) struct NewPortfolioEntryRow<'a> {
    pub id: Uuid,
    pub kind: &'a str,
    pub content: serde_json::Value,
}
