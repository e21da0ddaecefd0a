//! Skills shown with a proficiency level.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{ContentKind, Entry, PortfolioEntry};
use crate::domain::FieldErrors;
use crate::domain::validation::required_text;

/// Maximum length of skill and category names.
pub const NAME_MAX: usize = 60;
/// Upper bound of the proficiency scale.
pub const PROFICIENCY_MAX: i32 = 100;

/// Raw skill payload from the admin dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub proficiency: Option<i32>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// A validated skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    name: String,
    category: String,
    proficiency: i32,
    sort_order: i32,
}

impl Skill {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Proficiency on a 0–100 scale.
    pub fn proficiency(&self) -> i32 {
        self.proficiency
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

impl PortfolioEntry for Skill {
    type Form = SkillForm;

    const KIND: ContentKind = ContentKind::Skills;

    fn validate(form: &SkillForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = required_text(
            &mut errors,
            "name",
            form.name.as_deref().unwrap_or_default(),
            "Name is required",
            NAME_MAX,
        );
        let category = required_text(
            &mut errors,
            "category",
            form.category.as_deref().unwrap_or_default(),
            "Category is required",
            NAME_MAX,
        );
        let proficiency = match form.proficiency {
            Some(value) if (0..=PROFICIENCY_MAX).contains(&value) => value,
            Some(_) => {
                errors.push("proficiency", "Proficiency must be between 0 and 100");
                0
            }
            None => {
                errors.push("proficiency", "Proficiency is required");
                0
            }
        };

        errors.into_result(Self {
            name,
            category,
            proficiency,
            sort_order: form.sort_order.unwrap_or(0),
        })
    }

    fn listing_order(a: &Entry<Self>, b: &Entry<Self>) -> Ordering {
        a.content
            .category
            .cmp(&b.content.category)
            .then(a.content.sort_order.cmp(&b.content.sort_order))
            .then_with(|| a.content.name.cmp(&b.content.name))
    }
}
