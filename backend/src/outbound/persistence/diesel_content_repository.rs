//! PostgreSQL-backed `ContentRepository` shared by every collection.
//!
//! All collections live in `portfolio_entries`, keyed by kind, with the
//! validated content stored as JSONB. Listing order is applied after
//! loading because it differs per collection.

use std::marker::PhantomData;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::portfolio::{Entry, EntryId, PortfolioEntry, sort_for_listing};
use crate::domain::ports::{ContentRepository, ContentRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPortfolioEntryRow, PortfolioEntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::portfolio_entries;

/// Diesel-backed implementation of [`ContentRepository`] for collection `T`.
pub struct DieselContentRepository<T> {
    pool: DbPool,
    _entry: PhantomData<fn() -> T>,
}

impl<T> Clone for DieselContentRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T> DieselContentRepository<T> {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _entry: PhantomData,
        }
    }
}

fn map_pool_error(error: PoolError) -> ContentRepositoryError {
    map_basic_pool_error(error, ContentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContentRepositoryError {
    map_basic_diesel_error(
        error,
        ContentRepositoryError::query,
        ContentRepositoryError::connection,
    )
}

fn encode<T: PortfolioEntry>(content: &T) -> Result<serde_json::Value, ContentRepositoryError> {
    serde_json::to_value(content).map_err(|err| {
        ContentRepositoryError::query(format!("failed to encode {} content: {err}", T::KIND))
    })
}

fn row_to_entry<T: PortfolioEntry>(row: PortfolioEntryRow) -> Result<Entry<T>, ContentRepositoryError> {
    let content = serde_json::from_value(row.content).map_err(|err| {
        ContentRepositoryError::query(format!("invalid {} content in database: {err}", T::KIND))
    })?;
    Ok(Entry {
        id: EntryId::from_uuid(row.id),
        content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl<T: PortfolioEntry> ContentRepository<T> for DieselContentRepository<T> {
    async fn list(&self) -> Result<Vec<Entry<T>>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PortfolioEntryRow> = portfolio_entries::table
            .filter(portfolio_entries::kind.eq(T::KIND.as_str()))
            .select(PortfolioEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut entries = rows
            .into_iter()
            .map(row_to_entry::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        sort_for_listing(&mut entries);
        Ok(entries)
    }

    async fn insert(&self, content: &T) -> Result<Entry<T>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewPortfolioEntryRow {
            id: *EntryId::random().as_uuid(),
            kind: T::KIND.as_str(),
            content: encode(content)?,
        };
        let stored: PortfolioEntryRow = diesel::insert_into(portfolio_entries::table)
            .values(&row)
            .returning(PortfolioEntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_entry(stored)
    }

    async fn update(
        &self,
        id: &EntryId,
        content: &T,
    ) -> Result<Option<Entry<T>>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let target = portfolio_entries::table
            .filter(portfolio_entries::id.eq(id.as_uuid()))
            .filter(portfolio_entries::kind.eq(T::KIND.as_str()));
        let stored: Option<PortfolioEntryRow> = diesel::update(target)
            .set((
                portfolio_entries::content.eq(encode(content)?),
                portfolio_entries::updated_at.eq(diesel::dsl::now),
            ))
            .returning(PortfolioEntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        stored.map(row_to_entry).transpose()
    }

    async fn delete(&self, id: &EntryId) -> Result<bool, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let target = portfolio_entries::table
            .filter(portfolio_entries::id.eq(id.as_uuid()))
            .filter(portfolio_entries::kind.eq(T::KIND.as_str()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
