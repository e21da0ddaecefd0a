//! Work history entries.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ContentKind, Entry, PortfolioEntry};
use crate::domain::FieldErrors;
use crate::domain::validation::{optional_bounded_text, optional_date, required_date, required_text};

/// Maximum length of role, company and location.
pub const LABEL_MAX: usize = 120;
/// Maximum summary length.
pub const SUMMARY_MAX: usize = 2000;

/// Raw experience payload from the admin dashboard.
///
/// Dates are `YYYY-MM-DD` strings so malformed values surface as field
/// messages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceForm {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// A validated position; `end_date` is `None` for the current role.
///
/// ## Invariants
/// - `end_date`, when present, is not before `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    role: String,
    company: String,
    location: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    summary: String,
}

impl Experience {
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    pub fn company(&self) -> &str {
        self.company.as_str()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    /// Whether this is an ongoing position.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

impl PortfolioEntry for Experience {
    type Form = ExperienceForm;

    const KIND: ContentKind = ContentKind::Experiences;

    fn validate(form: &ExperienceForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let role = required_text(
            &mut errors,
            "role",
            form.role.as_deref().unwrap_or_default(),
            "Role is required",
            LABEL_MAX,
        );
        let company = required_text(
            &mut errors,
            "company",
            form.company.as_deref().unwrap_or_default(),
            "Company is required",
            LABEL_MAX,
        );
        let location =
            optional_bounded_text(&mut errors, "location", form.location.as_deref(), LABEL_MAX);
        let start_date = required_date(&mut errors, "startDate", form.start_date.as_deref());
        let end_date = optional_date(&mut errors, "endDate", form.end_date.as_deref());
        let summary = required_text(
            &mut errors,
            "summary",
            form.summary.as_deref().unwrap_or_default(),
            "Summary is required",
            SUMMARY_MAX,
        );

        if matches!((start_date, end_date), (Some(start), Some(end)) if end < start) {
            errors.push("endDate", "End date must not be before start date");
        }

        match start_date {
            Some(start_date) if errors.is_empty() => Ok(Self {
                role,
                company,
                location,
                start_date,
                end_date,
                summary,
            }),
            _ => Err(errors),
        }
    }

    fn listing_order(a: &Entry<Self>, b: &Entry<Self>) -> Ordering {
        b.content
            .start_date
            .cmp(&a.content.start_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    }
}
