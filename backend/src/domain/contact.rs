//! Contact-form submissions and the messages they persist as.
//!
//! [`ContactForm`] is the raw payload a visitor submits. It becomes a
//! [`ContactSubmission`] once every field rule passes, and a
//! [`ContactMessage`] after the store has assigned an id and timestamp.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{FieldErrors, optional_text, required_text};

/// Maximum length of the visitor's name.
pub const NAME_MAX: usize = 100;
/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum length of a message body.
pub const MESSAGE_MAX: usize = 2000;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Enquiry categories offered on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactCategory {
    /// Websites and web applications.
    #[serde(rename = "Web Development")]
    WebDevelopment,
    /// Interface and experience design.
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    /// Online shops.
    #[serde(rename = "E-commerce")]
    ECommerce,
    /// Anything else.
    #[serde(rename = "Other")]
    Other,
}

impl ContactCategory {
    /// Every category in display order.
    pub const ALL: [Self; 4] = [
        Self::WebDevelopment,
        Self::UiUxDesign,
        Self::ECommerce,
        Self::Other,
    ];

    /// Label shown to visitors and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::UiUxDesign => "UI/UX Design",
            Self::ECommerce => "E-commerce",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category label is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact category: {input}")]
pub struct ParseContactCategoryError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for ContactCategory {
    type Err = ParseContactCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseContactCategoryError {
                input: s.to_owned(),
            })
    }
}

/// Review state of a stored message.
///
/// Messages start `Pending` and only move to `Read`; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Not yet opened by the administrator.
    Pending,
    /// Marked as read by the administrator.
    Read,
}

impl MessageStatus {
    /// Returns the database string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use portfolio::domain::MessageStatus;
    /// assert_eq!(MessageStatus::Pending.as_str(), "pending");
    /// assert_eq!(MessageStatus::Read.as_str(), "read");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message status: {input}")]
pub struct ParseMessageStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for MessageStatus {
    type Err = ParseMessageStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "read" => Ok(Self::Read),
            _ => Err(ParseMessageStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Identifier assigned to a message by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
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

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw contact-form payload as submitted by a visitor.
///
/// Every field is optional at this stage so that missing values surface as
/// field-level messages rather than deserialisation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Visitor's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Reply address.
    #[serde(default)]
    pub email: Option<String>,
    /// Category label from the allow-list.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text budget indication.
    #[serde(default)]
    pub budget: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: Option<String>,
    /// Hidden field left empty by humans.
    #[serde(default, rename = "_honeypot")]
    pub honeypot: Option<String>,
}

/// A contact form that passed validation.
///
/// ## Invariants
/// - `name` and `message` are trimmed, non-empty and within length limits.
/// - `email` is trimmed and matches the accepted address pattern.
/// - `budget` is `None` when blank.
/// - `honeypot` is `None` when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    category: ContactCategory,
    budget: Option<String>,
    message: String,
    honeypot: Option<String>,
}

impl ContactSubmission {
    /// Validate a raw form, collecting a message for every failing field.
    ///
    /// # Examples
    /// ```
    /// use portfolio::domain::{ContactCategory, ContactForm, ContactSubmission};
    ///
    /// let form = ContactForm {
    ///     name: Some(" Ada ".into()),
    ///     email: Some("ada@example.com".into()),
    ///     category: Some("Web Development".into()),
    ///     message: Some("Need a site".into()),
    ///     ..ContactForm::default()
    /// };
    /// let submission = ContactSubmission::try_from_form(&form).unwrap();
    /// assert_eq!(submission.name(), "Ada");
    /// assert_eq!(submission.category(), ContactCategory::WebDevelopment);
    /// assert!(!submission.is_spam());
    /// ```
    pub fn try_from_form(form: &ContactForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = required_text(
            &mut errors,
            "name",
            form.name.as_deref().unwrap_or_default(),
            "Name is required",
            NAME_MAX,
        );

        let email = form.email.as_deref().unwrap_or_default().trim().to_owned();
        if email.chars().count() > EMAIL_MAX || !email_regex().is_match(&email) {
            errors.push("email", "Please enter a valid email address");
        }

        let category = form
            .category
            .as_deref()
            .map(str::trim)
            .and_then(|label| label.parse::<ContactCategory>().ok());
        if category.is_none() {
            errors.push("category", "Please select a valid category");
        }

        let message = required_text(
            &mut errors,
            "message",
            form.message.as_deref().unwrap_or_default(),
            "Message is required",
            MESSAGE_MAX,
        );

        match category {
            Some(category) if errors.is_empty() => Ok(Self {
                name,
                email,
                category,
                budget: optional_text(form.budget.as_deref()),
                message,
                honeypot: optional_text(form.honeypot.as_deref()),
            }),
            _ => Err(errors),
        }
    }

    /// Visitor's name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Reply address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Selected category.
    pub fn category(&self) -> ContactCategory {
        self.category
    }

    /// Budget indication, if given.
    pub fn budget(&self) -> Option<&str> {
        self.budget.as_deref()
    }

    /// Message body.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Whether the hidden honeypot field was filled in.
    pub fn is_spam(&self) -> bool {
        self.honeypot.is_some()
    }

    /// Fields to persist; the honeypot never reaches the store.
    pub fn to_new_message(&self) -> NewContactMessage {
        NewContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            category: self.category,
            budget: self.budget.clone(),
            message: self.message.clone(),
        }
    }
}

/// Values written by the persistence gateway.
///
/// There is deliberately no status field: stores always insert `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    /// Visitor's name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Selected category.
    pub category: ContactCategory,
    /// Budget indication, if given.
    pub budget: Option<String>,
    /// Message body.
    pub message: String,
}

/// A stored contact message as seen by the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Store-assigned identifier.
    pub id: MessageId,
    /// Visitor's name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Selected category.
    pub category: ContactCategory,
    /// Budget indication, if given.
    pub budget: Option<String>,
    /// Message body.
    pub message: String,
    /// Review state.
    pub status: MessageStatus,
    /// Store-assigned creation time; never changes.
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Build the freshly persisted record for `new` with `pending` status.
    pub fn pending(id: MessageId, new: NewContactMessage, created_at: DateTime<Utc>) -> Self {
        let NewContactMessage {
            name,
            email,
            category,
            budget,
            message,
        } = new;
        Self {
            id,
            name,
            email,
            category,
            budget,
            message,
            status: MessageStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_form() -> ContactForm {
        ContactForm {
            name: Some("Ada".to_owned()),
            email: Some("ada@example.com".to_owned()),
            category: Some("Web Development".to_owned()),
            budget: Some("$1000-$5000".to_owned()),
            message: Some("Need a site".to_owned()),
            honeypot: Some(String::new()),
        }
    }

    #[rstest]
    fn accepts_valid_form(valid_form: ContactForm) {
        let submission = ContactSubmission::try_from_form(&valid_form).expect("valid form");

        assert_eq!(submission.name(), "Ada");
        assert_eq!(submission.email(), "ada@example.com");
        assert_eq!(submission.category(), ContactCategory::WebDevelopment);
        assert_eq!(submission.budget(), Some("$1000-$5000"));
        assert_eq!(submission.message(), "Need a site");
        assert!(!submission.is_spam());
    }

    #[rstest]
    fn validation_is_idempotent(valid_form: ContactForm) {
        let first = ContactSubmission::try_from_form(&valid_form);
        let second = ContactSubmission::try_from_form(&valid_form);
        assert_eq!(first, second);
    }

    #[rstest]
    fn reports_every_failing_field() {
        let form = ContactForm {
            name: Some("   ".to_owned()),
            email: Some("not-an-email".to_owned()),
            category: Some("Plumbing".to_owned()),
            message: None,
            ..ContactForm::default()
        };

        let errors = ContactSubmission::try_from_form(&form).expect_err("invalid form");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["category", "email", "message", "name"]
        );
        assert_eq!(errors.messages("email"), ["Please enter a valid email address"]);
        assert_eq!(errors.messages("message"), ["Message is required"]);
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("  ada@example.co.uk ", true)]
    #[case("ada@example", false)]
    #[case("ada example.com", false)]
    #[case("@example.com", false)]
    #[case("", false)]
    fn email_pattern(valid_form: ContactForm, #[case] email: &str, #[case] accepted: bool) {
        let form = ContactForm {
            email: Some(email.to_owned()),
            ..valid_form
        };
        assert_eq!(ContactSubmission::try_from_form(&form).is_ok(), accepted);
    }

    #[rstest]
    fn message_length_is_bounded(valid_form: ContactForm) {
        let at_limit = ContactForm {
            message: Some("x".repeat(MESSAGE_MAX)),
            ..valid_form.clone()
        };
        assert!(ContactSubmission::try_from_form(&at_limit).is_ok());

        let over_limit = ContactForm {
            message: Some("x".repeat(MESSAGE_MAX + 1)),
            ..valid_form
        };
        let errors = ContactSubmission::try_from_form(&over_limit).expect_err("too long");
        assert_eq!(
            errors.messages("message"),
            ["Message must be at most 2000 characters"]
        );
    }

    #[rstest]
    fn blank_budget_and_honeypot_are_absent(valid_form: ContactForm) {
        let form = ContactForm {
            budget: Some("  ".to_owned()),
            honeypot: Some(" ".to_owned()),
            ..valid_form
        };
        let submission = ContactSubmission::try_from_form(&form).expect("valid form");
        assert_eq!(submission.budget(), None);
        assert!(!submission.is_spam());
    }

    #[rstest]
    fn filled_honeypot_marks_spam(valid_form: ContactForm) {
        let form = ContactForm {
            honeypot: Some("http://spam.example".to_owned()),
            ..valid_form
        };
        let submission = ContactSubmission::try_from_form(&form).expect("valid form");
        assert!(submission.is_spam());
    }

    #[rstest]
    fn form_deserialises_honeypot_field() {
        let form: ContactForm = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "_honeypot": "bot"
        }))
        .expect("form payload");
        assert_eq!(form.honeypot.as_deref(), Some("bot"));
        assert!(form.email.is_none());
    }

    #[rstest]
    #[case("pending", MessageStatus::Pending)]
    #[case("read", MessageStatus::Read)]
    fn status_round_trips_through_strings(#[case] raw: &str, #[case] status: MessageStatus) {
        assert_eq!(raw.parse::<MessageStatus>(), Ok(status));
        assert_eq!(status.as_str(), raw);
    }

    #[rstest]
    fn unknown_category_label_is_rejected() {
        let err = "Gardening".parse::<ContactCategory>().expect_err("not allowed");
        assert_eq!(err.input, "Gardening");
    }
}
