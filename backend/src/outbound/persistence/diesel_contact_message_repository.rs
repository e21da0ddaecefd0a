//! PostgreSQL-backed `ContactMessageRepository` using Diesel.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactMessageRepository, ContactMessageRepositoryError};
use crate::domain::{
    ContactCategory, ContactMessage, MessageId, MessageStatus, NewContactMessage,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ContactMessageRow, NewContactMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::contact_messages;

/// Diesel-backed implementation of the `ContactMessageRepository` port.
#[derive(Clone)]
pub struct DieselContactMessageRepository {
    pool: DbPool,
}

impl DieselContactMessageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactMessageRepositoryError {
    map_basic_pool_error(error, ContactMessageRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContactMessageRepositoryError {
    map_basic_diesel_error(
        error,
        ContactMessageRepositoryError::query,
        ContactMessageRepositoryError::connection,
    )
}

fn row_to_message(row: ContactMessageRow) -> Result<ContactMessage, ContactMessageRepositoryError> {
    let category = ContactCategory::from_str(&row.category).map_err(|err| {
        ContactMessageRepositoryError::query(format!("invalid category in database: {err}"))
    })?;
    let status = MessageStatus::from_str(&row.status).map_err(|err| {
        ContactMessageRepositoryError::query(format!("invalid status in database: {err}"))
    })?;

    Ok(ContactMessage {
        id: MessageId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        category,
        budget: row.budget,
        message: row.message,
        status,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ContactMessageRepository for DieselContactMessageRepository {
    async fn insert(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = MessageId::random();
        let row = NewContactMessageRow {
            id: *id.as_uuid(),
            name: message.name.as_str(),
            email: message.email.as_str(),
            category: message.category.as_str(),
            budget: message.budget.as_deref(),
            message: message.message.as_str(),
            status: MessageStatus::Pending.as_str(),
        };

        let stored: ContactMessageRow = diesel::insert_into(contact_messages::table)
            .values(&row)
            .returning(ContactMessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_message(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactMessageRow> = contact_messages::table
            .select(ContactMessageRow::as_select())
            .order((contact_messages::created_at.desc(), contact_messages::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_message).collect()
    }

    async fn mark_read(&self, id: &MessageId) -> Result<bool, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(contact_messages::table.find(*id.as_uuid()))
            .set(contact_messages::status.eq(MessageStatus::Read.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &MessageId) -> Result<bool, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(contact_messages::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
