//! Generic in-memory `ContentRepository` adapter.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::portfolio::{Entry, EntryId, PortfolioEntry, sort_for_listing};
use crate::domain::ports::{ContentRepository, ContentRepositoryError};

/// Entries of one collection held in a mutex-guarded vector.
pub struct InMemoryContentRepository<T> {
    clock: Arc<dyn Clock>,
    entries: Mutex<Vec<Entry<T>>>,
}

impl<T> Default for InMemoryContentRepository<T> {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl<T> InMemoryContentRepository<T> {
    /// Create an empty repository stamping entries with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, Vec<Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<T: PortfolioEntry> ContentRepository<T> for InMemoryContentRepository<T> {
    async fn list(&self) -> Result<Vec<Entry<T>>, ContentRepositoryError> {
        let mut entries = self.lock_entries().clone();
        sort_for_listing(&mut entries);
        Ok(entries)
    }

    async fn insert(&self, content: &T) -> Result<Entry<T>, ContentRepositoryError> {
        let entry = Entry::new(EntryId::random(), content.clone(), self.clock.utc());
        self.lock_entries().push(entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        id: &EntryId,
        content: &T,
    ) -> Result<Option<Entry<T>>, ContentRepositoryError> {
        let now = self.clock.utc();
        let mut entries = self.lock_entries();
        let Some(slot) = entries.iter_mut().find(|entry| &entry.id == id) else {
            return Ok(None);
        };
        *slot = slot.clone().replace(content.clone(), now);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &EntryId) -> Result<bool, ContentRepositoryError> {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        Ok(entries.len() != before)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::portfolio::{Certificate, CertificateForm};
    use rstest::rstest;

    fn certificate(title: &str, issued_on: &str) -> Certificate {
        Certificate::validate(&CertificateForm {
            title: Some(title.to_owned()),
            issuer: Some("Issuer".to_owned()),
            issued_on: Some(issued_on.to_owned()),
            credential_url: None,
            image_url: None,
        })
        .expect("valid certificate")
    }

    #[rstest]
    #[tokio::test]
    async fn lists_in_collection_order() {
        let repo = InMemoryContentRepository::<Certificate>::default();
        repo.insert(&certificate("older", "2020-01-01"))
            .await
            .expect("insert");
        repo.insert(&certificate("newer", "2024-01-01"))
            .await
            .expect("insert");

        let titles: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|entry| entry.content.title().to_owned())
            .collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_entry_returns_none() {
        let repo = InMemoryContentRepository::<Certificate>::default();
        let updated = repo
            .update(&EntryId::random(), &certificate("x", "2020-01-01"))
            .await
            .expect("update");
        assert!(updated.is_none());
    }
}
