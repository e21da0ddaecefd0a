//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_message_repository;
mod contact_metrics;
mod contact_submission;
mod content;
mod content_repository;
mod inbox;
mod login_service;
mod page_cache;
mod rate_limiter;

#[cfg(test)]
pub use contact_message_repository::MockContactMessageRepository;
pub use contact_message_repository::{ContactMessageRepository, ContactMessageRepositoryError};
#[cfg(test)]
pub use contact_metrics::MockContactMetrics;
pub use contact_metrics::{
    ContactMetrics, ContactMetricsError, NoOpContactMetrics, SubmissionOutcomeLabel,
};
pub use contact_submission::ContactSubmissionCommand;
pub use content::{ContentCommand, ContentQuery};
pub use content_repository::{ContentRepository, ContentRepositoryError};
pub use inbox::{InboxCommand, InboxQuery};
pub use login_service::{DisabledLoginService, LoginService};
#[cfg(test)]
pub use page_cache::MockPageCache;
pub use page_cache::{
    Generation, NoOpPageCache, PageCache, PageCacheError, PageKey, PageLookup,
};
#[cfg(test)]
pub use rate_limiter::MockSubmissionRateLimiter;
pub use rate_limiter::{SubmissionRateLimiter, UnlimitedRateLimiter};
