//! Certifications and the issuing bodies.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ContentKind, Entry, PortfolioEntry};
use crate::domain::FieldErrors;
use crate::domain::validation::{optional_web_url, required_date, required_text};

/// Maximum length of title and issuer.
pub const LABEL_MAX: usize = 120;

/// Raw certificate payload from the admin dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub issued_on: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A validated certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    title: String,
    issuer: String,
    issued_on: NaiveDate,
    credential_url: Option<String>,
    image_url: Option<String>,
}

impl Certificate {
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    pub fn credential_url(&self) -> Option<&str> {
        self.credential_url.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

impl PortfolioEntry for Certificate {
    type Form = CertificateForm;

    const KIND: ContentKind = ContentKind::Certificates;

    fn validate(form: &CertificateForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = required_text(
            &mut errors,
            "title",
            form.title.as_deref().unwrap_or_default(),
            "Title is required",
            LABEL_MAX,
        );
        let issuer = required_text(
            &mut errors,
            "issuer",
            form.issuer.as_deref().unwrap_or_default(),
            "Issuer is required",
            LABEL_MAX,
        );
        let issued_on = required_date(&mut errors, "issuedOn", form.issued_on.as_deref());
        let credential_url =
            optional_web_url(&mut errors, "credentialUrl", form.credential_url.as_deref());
        let image_url = optional_web_url(&mut errors, "imageUrl", form.image_url.as_deref());

        match issued_on {
            Some(issued_on) if errors.is_empty() => Ok(Self {
                title,
                issuer,
                issued_on,
                credential_url,
                image_url,
            }),
            _ => Err(errors),
        }
    }

    fn listing_order(a: &Entry<Self>, b: &Entry<Self>) -> Ordering {
        b.content
            .issued_on
            .cmp(&a.content.issued_on)
            .then_with(|| a.content.title.cmp(&b.content.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn validates_certificate() {
        let certificate = Certificate::validate(&CertificateForm {
            title: Some("AWS Solutions Architect".to_owned()),
            issuer: Some("Amazon".to_owned()),
            issued_on: Some("2024-06-30".to_owned()),
            credential_url: Some("https://credly.example/abc".to_owned()),
            image_url: None,
        })
        .expect("valid certificate");

        assert_eq!(certificate.issuer(), "Amazon");
        assert_eq!(certificate.credential_url(), Some("https://credly.example/abc"));
    }

    #[rstest]
    fn reports_each_missing_field() {
        let errors = Certificate::validate(&CertificateForm::default()).expect_err("empty");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["issuedOn", "issuer", "title"]
        );
        assert_eq!(errors.messages("issuedOn"), ["Issued on is required"]);
    }
}
