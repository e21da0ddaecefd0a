//! Showcased projects.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{ContentKind, Entry, PortfolioEntry};
use crate::domain::FieldErrors;
use crate::domain::validation::{optional_web_url, required_text};

/// Maximum title length.
pub const TITLE_MAX: usize = 120;
/// Maximum summary length.
pub const SUMMARY_MAX: usize = 2000;
/// Maximum number of tags.
pub const TAGS_MAX: usize = 12;
/// Maximum length of a single tag.
pub const TAG_MAX: usize = 32;

/// Raw project payload from the admin dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// A validated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    title: String,
    summary: String,
    tags: Vec<String>,
    live_url: Option<String>,
    repo_url: Option<String>,
    image_url: Option<String>,
    featured: bool,
    sort_order: i32,
}

impl Project {
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn live_url(&self) -> Option<&str> {
        self.live_url.as_deref()
    }

    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn featured(&self) -> bool {
        self.featured
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

fn validate_tags(errors: &mut FieldErrors, raw: &[String]) -> Vec<String> {
    if raw.len() > TAGS_MAX {
        errors.push("tags", format!("At most {TAGS_MAX} tags are allowed"));
    }
    let tags: Vec<String> = raw.iter().map(|tag| tag.trim().to_owned()).collect();
    if tags.iter().any(String::is_empty) {
        errors.push("tags", "Tags must not be blank");
    }
    if tags.iter().any(|tag| tag.chars().count() > TAG_MAX) {
        errors.push("tags", format!("Each tag must be at most {TAG_MAX} characters"));
    }
    tags
}

impl PortfolioEntry for Project {
    type Form = ProjectForm;

    const KIND: ContentKind = ContentKind::Projects;

    fn validate(form: &ProjectForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = required_text(
            &mut errors,
            "title",
            form.title.as_deref().unwrap_or_default(),
            "Title is required",
            TITLE_MAX,
        );
        let summary = required_text(
            &mut errors,
            "summary",
            form.summary.as_deref().unwrap_or_default(),
            "Summary is required",
            SUMMARY_MAX,
        );
        let tags = validate_tags(&mut errors, form.tags.as_deref().unwrap_or_default());
        let live_url = optional_web_url(&mut errors, "liveUrl", form.live_url.as_deref());
        let repo_url = optional_web_url(&mut errors, "repoUrl", form.repo_url.as_deref());
        let image_url = optional_web_url(&mut errors, "imageUrl", form.image_url.as_deref());

        errors.into_result(Self {
            title,
            summary,
            tags,
            live_url,
            repo_url,
            image_url,
            featured: form.featured.unwrap_or(false),
            sort_order: form.sort_order.unwrap_or(0),
        })
    }

    fn listing_order(a: &Entry<Self>, b: &Entry<Self>) -> Ordering {
        a.content
            .sort_order
            .cmp(&b.content.sort_order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    }
}
