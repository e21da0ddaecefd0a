//! Builders for HTTP state ports backed by Diesel or in-memory adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use portfolio::domain::portfolio::PortfolioEntry;
use portfolio::domain::ports::{
    ContactMessageRepository, ContactMetrics, ContactSubmissionCommand, ContentRepository,
    InboxCommand, InboxQuery, NoOpContactMetrics, PageCache, SubmissionRateLimiter,
};
use portfolio::domain::{
    ContactSubmissionService, ContentService, FixedWindowRateLimiter, InboxService,
};
use portfolio::inbound::http::state::{ContentPorts, ContentState, HttpState, HttpStatePorts};
use portfolio::outbound::cache::InMemoryPageCache;
use portfolio::outbound::memory::{InMemoryContactMessageRepository, InMemoryContentRepository};
#[cfg(feature = "metrics")]
use portfolio::outbound::metrics::PrometheusContactMetrics;
use portfolio::outbound::persistence::{DieselContactMessageRepository, DieselContentRepository};

use super::ServerConfig;

/// Adapters shared by every service regardless of the storage backend.
struct SharedAdapters {
    clock: Arc<dyn Clock>,
    page_cache: Arc<dyn PageCache>,
    rate_limiter: Arc<dyn SubmissionRateLimiter>,
    metrics: Arc<dyn ContactMetrics>,
}

struct MessagePorts {
    contact: Arc<dyn ContactSubmissionCommand>,
    inbox_query: Arc<dyn InboxQuery>,
    inbox: Arc<dyn InboxCommand>,
}

/// Build contact metrics backed by the Prometheus registry when one is
/// configured.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
#[cfg(feature = "metrics")]
fn build_contact_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn ContactMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusContactMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("contact metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpContactMetrics)),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_contact_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn ContactMetrics>> {
    Ok(Arc::new(NoOpContactMetrics))
}

fn message_ports<R>(repository: Arc<R>, shared: &SharedAdapters) -> MessagePorts
where
    R: ContactMessageRepository + 'static,
{
    let contact = ContactSubmissionService::new(
        repository.clone(),
        shared.rate_limiter.clone(),
        shared.page_cache.clone(),
        shared.metrics.clone(),
    );
    let inbox = Arc::new(InboxService::new(repository, shared.page_cache.clone()));
    MessagePorts {
        contact: Arc::new(contact),
        inbox_query: inbox.clone(),
        inbox,
    }
}

fn build_message_ports(config: &ServerConfig, shared: &SharedAdapters) -> MessagePorts {
    match &config.db_pool {
        Some(pool) => message_ports(
            Arc::new(DieselContactMessageRepository::new(pool.clone())),
            shared,
        ),
        None => message_ports(
            Arc::new(InMemoryContactMessageRepository::new(shared.clock.clone())),
            shared,
        ),
    }
}

fn service_ports<T, R>(repository: Arc<R>, shared: &SharedAdapters) -> ContentPorts<T>
where
    T: PortfolioEntry,
    R: ContentRepository<T> + 'static,
{
    ContentPorts::from_service(Arc::new(ContentService::new(
        repository,
        shared.page_cache.clone(),
    )))
}

fn build_content_ports<T: PortfolioEntry>(
    config: &ServerConfig,
    shared: &SharedAdapters,
) -> ContentPorts<T> {
    match &config.db_pool {
        Some(pool) => service_ports(
            Arc::new(DieselContentRepository::<T>::new(pool.clone())),
            shared,
        ),
        None => service_ports(
            Arc::new(InMemoryContentRepository::<T>::new(shared.clock.clone())),
            shared,
        ),
    }
}

/// Build the shared HTTP state, selecting Diesel adapters when a pool is
/// configured and in-memory adapters otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] if metrics registration fails.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let shared = SharedAdapters {
        rate_limiter: Arc::new(FixedWindowRateLimiter::new(
            config.rate_limit,
            clock.clone(),
        )),
        page_cache: Arc::new(InMemoryPageCache::new(clock.clone())),
        metrics: build_contact_metrics(config)?,
        clock,
    };
    if config.db_pool.is_none() {
        tracing::warn!("no database configured; contact messages and content are kept in memory");
    }

    let MessagePorts {
        contact,
        inbox_query,
        inbox,
    } = build_message_ports(config, &shared);

    Ok(web::Data::new(HttpState::new(
        HttpStatePorts {
            login: config.login.clone(),
            contact,
            inbox_query,
            inbox,
        },
        ContentState {
            projects: build_content_ports(config, &shared),
            skills: build_content_ports(config, &shared),
            experiences: build_content_ports(config, &shared),
            certificates: build_content_ports(config, &shared),
        },
    )))
}
