//! Portfolio content managed from the admin dashboard.
//!
//! Four collections share one shape: an admin submits a raw form, the form
//! validates into a content value implementing [`PortfolioEntry`], and the
//! store wraps it in an [`Entry`] carrying the identifier and timestamps.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FieldErrors;

mod certificate;
mod experience;
mod project;
mod skill;

pub use certificate::{Certificate, CertificateForm};
pub use experience::{Experience, ExperienceForm};
pub use project::{Project, ProjectForm};
pub use skill::{Skill, SkillForm};

/// Collection a piece of content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Showcased projects.
    Projects,
    /// Skills with proficiency levels.
    Skills,
    /// Work history.
    Experiences,
    /// Certifications.
    Certificates,
}

impl ContentKind {
    /// Path segment and cache-key suffix for the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Experiences => "experiences",
            Self::Certificates => "certificates",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a stored content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated content of one collection.
pub trait PortfolioEntry:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Raw admin payload validated into `Self`.
    type Form: DeserializeOwned + Send + Sync + 'static;

    /// Collection this content belongs to.
    const KIND: ContentKind;

    /// Validate a raw form, collecting every failing field.
    fn validate(form: &Self::Form) -> Result<Self, FieldErrors>;

    /// Ordering of entries in public listings.
    fn listing_order(a: &Entry<Self>, b: &Entry<Self>) -> Ordering;
}

/// Stored content with its identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry<T> {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Validated content.
    #[serde(flatten)]
    pub content: T,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last update.
    pub updated_at: DateTime<Utc>,
}

impl<T: PortfolioEntry> Entry<T> {
    /// Create a fresh entry stamped at `now`.
    pub fn new(id: EntryId, content: T, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content, keeping identity and creation time.
    pub fn replace(self, content: T, now: DateTime<Utc>) -> Self {
        Self {
            content,
            updated_at: now,
            ..self
        }
    }
}

/// Sort entries into their collection's listing order.
pub fn sort_for_listing<T: PortfolioEntry>(entries: &mut [Entry<T>]) {
    entries.sort_by(T::listing_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, hour, 0, 0)
            .single()
            .expect("valid fixture time")
    }

    fn skill(name: &str, category: &str, sort_order: i32) -> Skill {
        Skill::validate(&SkillForm {
            name: Some(name.to_owned()),
            category: Some(category.to_owned()),
            proficiency: Some(80),
            sort_order: Some(sort_order),
        })
        .expect("valid skill")
    }

    #[rstest]
    fn replace_keeps_identity_and_creation_time() {
        let id = EntryId::random();
        let entry = Entry::new(id, skill("Rust", "Languages", 0), at(9));
        let updated = entry.replace(skill("Rust", "Languages", 5), at(11));

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, at(9));
        assert_eq!(updated.updated_at, at(11));
        assert_eq!(updated.content.sort_order(), 5);
    }

    #[rstest]
    fn entries_serialise_flat_with_camel_case_timestamps() {
        let entry = Entry::new(EntryId::random(), skill("Rust", "Languages", 0), at(9));
        let value = serde_json::to_value(&entry).expect("serialise entry");

        assert_eq!(value["name"], "Rust");
        assert_eq!(value["sortOrder"], 0);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("content").is_none());

        let back: Entry<Skill> = serde_json::from_value(value).expect("deserialise entry");
        assert_eq!(back, entry);
    }

    #[rstest]
    fn sort_for_listing_uses_collection_order() {
        let mut entries = vec![
            Entry::new(EntryId::random(), skill("Figma", "Design", 1), at(9)),
            Entry::new(EntryId::random(), skill("Rust", "Languages", 2), at(9)),
            Entry::new(EntryId::random(), skill("Go", "Languages", 1), at(9)),
        ];
        sort_for_listing(&mut entries);

        let names: Vec<&str> = entries.iter().map(|e| e.content.name()).collect();
        assert_eq!(names, ["Figma", "Go", "Rust"]);
    }

    #[rstest]
    #[case(ContentKind::Projects, "projects")]
    #[case(ContentKind::Certificates, "certificates")]
    fn kind_labels(#[case] kind: ContentKind, #[case] label: &str) {
        assert_eq!(kind.as_str(), label);
    }
}
