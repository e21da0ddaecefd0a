//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for contact messages and
//! portfolio content, the services that enforce their rules, and the ports
//! adapters implement. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - ContactSubmission and ContactMessage: the contact pipeline's data.
//! - FixedWindowRateLimiter: per-client submission throttling.
//! - ContactSubmissionService, InboxService, ContentService: use-cases.

pub mod admin_login_service;
pub mod auth;
pub mod contact;
pub mod contact_service;
pub mod content_service;
pub mod error;
pub mod inbox_service;
mod listing_cache;
pub mod portfolio;
pub mod ports;
pub mod rate_limit;
pub mod trace_id;
pub mod validation;

pub use self::admin_login_service::{AdminAccountError, ConfiguredLoginService};
pub use self::auth::{AdminId, LoginCredentials, LoginValidationError};
pub use self::contact::{
    ContactCategory, ContactForm, ContactMessage, ContactSubmission, MessageId, MessageStatus,
    NewContactMessage, ParseContactCategoryError, ParseMessageStatusError,
};
pub use self::contact_service::{
    CONTACT_SUCCESS_MESSAGE, ContactSubmissionService, RATE_LIMITED_MESSAGE,
    SUBMISSION_FAILED_MESSAGE, SubmissionOutcome,
};
pub use self::content_service::ContentService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::inbox_service::{InboxService, unread_count};
pub use self::rate_limit::{
    ClientKey, FixedWindowRateLimiter, RateDecision, RateLimitPolicy, UNKNOWN_CLIENT,
};
pub use self::trace_id::TraceId;
pub use self::validation::{FieldErrors, INVALID_FORM_MESSAGE};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use portfolio::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
