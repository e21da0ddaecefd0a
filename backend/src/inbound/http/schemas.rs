//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The client exceeded its submission allowance.
    #[schema(rename = "too_many_requests")]
    TooManyRequests,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Something went wrong")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ContactForm`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ContactForm)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactFormSchema {
    /// Visitor's name, 2 to 100 characters.
    #[schema(example = "Ada")]
    name: Option<String>,
    /// Reply address.
    #[schema(example = "ada@example.com")]
    email: Option<String>,
    /// One of `Web Development`, `UI/UX Design`, `E-commerce`, `Other`.
    #[schema(example = "Web Development")]
    category: Option<String>,
    /// Free-text budget indication.
    budget: Option<String>,
    /// Message body, 10 to 2000 characters.
    #[schema(example = "I need a portfolio site")]
    message: Option<String>,
    /// Hidden field; humans leave it empty.
    #[schema(rename = "_honeypot")]
    honeypot: Option<String>,
}

/// OpenAPI schema for [`crate::domain::MessageStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MessageStatus)]
pub enum MessageStatusSchema {
    /// Not yet opened.
    #[schema(rename = "pending")]
    Pending,
    /// Opened by the administrator.
    #[schema(rename = "read")]
    Read,
}

/// OpenAPI schema for [`crate::domain::ContactMessage`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ContactMessage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactMessageSchema {
    /// Store-assigned identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Web Development")]
    category: String,
    budget: Option<String>,
    message: String,
    status: MessageStatusSchema,
    /// RFC 3339 creation timestamp.
    #[schema(example = "2026-01-05T10:00:00Z")]
    created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let name = ErrorCodeSchema::name();
        // utoipa replaces :: with . in schema names
        assert_eq!(name, "crate.domain.ErrorCode");
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "not_found",
            "too_many_requests",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_has_expected_name() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
    }

    #[test]
    fn contact_form_schema_exposes_honeypot_field() {
        let schema_json = schema_to_json::<ContactFormSchema>();
        assert_eq!(ContactFormSchema::name(), "crate.domain.ContactForm");
        assert!(schema_json.contains("_honeypot"));
    }

    #[test]
    fn contact_message_schema_uses_camel_case() {
        let schema_json = schema_to_json::<ContactMessageSchema>();
        assert!(schema_json.contains("createdAt"));
        assert!(!schema_json.contains("created_at"));
    }
}
