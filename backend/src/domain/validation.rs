//! Field-level validation failures shared by form-like inputs.
//!
//! Validators collect every failing field before returning so callers can
//! render all problems at once. Fields are kept in a `BTreeMap` so serialised
//! output is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use super::Error;

/// Message attached to [`Error`] when form validation fails.
pub const INVALID_FORM_MESSAGE: &str = "Please correct the highlighted fields.";

/// Per-field validation messages.
///
/// # Examples
/// ```
/// use portfolio::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.push("email", "Please enter a valid email address");
/// assert_eq!(errors.messages("email"), ["Please enter a valid email address"]);
/// assert!(errors.messages("name").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Record a failure message against `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, empty when the field passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Return `value` when no field failed, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::invalid_request(INVALID_FORM_MESSAGE).with_details(json!({ "errors": errors }))
    }
}

/// Trim `value` and require it to be non-empty and at most `max` characters.
///
/// Records `required` or a length message on `errors` and returns the trimmed
/// text (possibly empty) so validators can keep collecting failures.
pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    required: &str,
    max: usize,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, required);
    } else if trimmed.chars().count() > max {
        errors.push(field, format!("{} must be at most {max} characters", label(field)));
    }
    trimmed.to_owned()
}

/// Trim an optional value, treating blank input as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Trim an optional value and bound its length; blank input is absent.
pub(crate) fn optional_bounded_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let text = optional_text(value)?;
    if text.chars().count() > max {
        errors.push(field, format!("{} must be at most {max} characters", label(field)));
    }
    Some(text)
}

/// Parse a required `YYYY-MM-DD` date.
pub(crate) fn required_date(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    let Some(text) = optional_text(value) else {
        errors.push(field, format!("{} is required", label(field)));
        return None;
    };
    optional_date(errors, field, Some(&text))
}

/// Parse an optional `YYYY-MM-DD` date; blank input is absent.
pub(crate) fn optional_date(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    let text = optional_text(value)?;
    match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, format!("{} must be a date (YYYY-MM-DD)", label(field)));
            None
        }
    }
}

/// Validate an optional absolute `http`/`https` URL.
pub(crate) fn optional_web_url(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<String> {
    let candidate = optional_text(value)?;
    match url::Url::parse(&candidate) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(candidate),
        _ => {
            errors.push(field, format!("{} must be an http(s) URL", label(field)));
            None
        }
    }
}

fn label(field: &str) -> String {
    let mut words = String::with_capacity(field.len() + 2);
    for (index, ch) in field.chars().enumerate() {
        if index == 0 {
            words.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            words.push(' ');
            words.extend(ch.to_lowercase());
        } else {
            words.push(ch);
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn into_error_carries_field_messages() {
        let mut errors = FieldErrors::default();
        errors.push("email", "Please enter a valid email address");
        errors.push("name", "Name is required");

        let error = Error::from(errors);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), INVALID_FORM_MESSAGE);
        assert_eq!(
            error.details(),
            Some(&json!({
                "errors": {
                    "email": ["Please enter a valid email address"],
                    "name": ["Name is required"],
                }
            }))
        );
    }

    #[rstest]
    #[case("   ", Some("Name is required"))]
    #[case("Ada", None)]
    #[case("abcdef", Some("Name must be at most 5 characters"))]
    fn required_text_checks_presence_and_length(
        #[case] input: &str,
        #[case] expected: Option<&str>,
    ) {
        let mut errors = FieldErrors::default();
        let value = required_text(&mut errors, "name", input, "Name is required", 5);

        assert_eq!(value, input.trim());
        assert_eq!(errors.messages("name").first().map(String::as_str), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some(" $500 "), Some("$500"))]
    fn optional_text_drops_blank_values(
        #[case] input: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(optional_text(input).as_deref(), expected);
    }

    #[rstest]
    #[case(Some("2024-02-29"), true, None)]
    #[case(Some("29/02/2024"), false, Some("Start date must be a date (YYYY-MM-DD)"))]
    #[case(None, false, Some("Start date is required"))]
    #[case(Some(" "), false, Some("Start date is required"))]
    fn required_date_parses_iso_dates(
        #[case] input: Option<&str>,
        #[case] parsed: bool,
        #[case] message: Option<&str>,
    ) {
        let mut errors = FieldErrors::default();
        let value = required_date(&mut errors, "startDate", input);

        assert_eq!(value.is_some(), parsed);
        assert_eq!(errors.messages("startDate").first().map(String::as_str), message);
    }

    #[rstest]
    fn optional_bounded_text_keeps_value_and_flags_length() {
        let mut errors = FieldErrors::default();
        let value = optional_bounded_text(&mut errors, "location", Some(" Berlin, Germany "), 6);

        assert_eq!(value.as_deref(), Some("Berlin, Germany"));
        assert_eq!(errors.messages("location"), ["Location must be at most 6 characters"]);
    }

    #[rstest]
    #[case("https://example.com/work", true)]
    #[case("http://example.com", true)]
    #[case("ftp://example.com", false)]
    #[case("not a url", false)]
    fn optional_web_url_accepts_only_http_schemes(#[case] input: &str, #[case] accepted: bool) {
        let mut errors = FieldErrors::default();
        let value = optional_web_url(&mut errors, "liveUrl", Some(input));

        assert_eq!(value.is_some(), accepted);
        assert_eq!(errors.is_empty(), accepted);
        if !accepted {
            assert_eq!(errors.messages("liveUrl"), ["Live url must be an http(s) URL"]);
        }
    }
}
