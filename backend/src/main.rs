//! Backend entry-point: loads configuration, applies migrations and starts
//! the HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portfolio::inbound::http::client_key::ClientAddressPolicy;
use portfolio::inbound::http::health::HealthState;
use portfolio::inbound::http::session_config::{BuildMode, session_settings_from_env};
use portfolio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use portfolio::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Build Prometheus metrics, logging and discarding failures so the server
/// still starts without them.
#[cfg(feature = "metrics")]
fn initialize_metrics<E: std::fmt::Display>(
    make: impl FnOnce() -> Result<PrometheusMetrics, E>,
) -> Option<PrometheusMetrics> {
    match make() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}

async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        return Ok(None);
    };
    run_pending_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.db_pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    info!(max_size = settings.db_pool_max_size, "database pool ready");
    Ok(Some(pool))
}

fn build_server_config(
    settings: &AppSettings,
    db_pool: Option<DbPool>,
) -> std::io::Result<ServerConfig> {
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config =
        ServerConfig::new(session, bind_addr).with_rate_limit(settings.rate_limit_policy());
    match settings.admin_account().map_err(std::io::Error::other)? {
        Some(login) => config = config.with_login(Arc::new(login)),
        None => warn!("no administrator account configured; logins will be rejected"),
    }
    if settings.trust_forwarded_for {
        config = config.with_client_address(ClientAddressPolicy::ForwardedHeaders);
    }
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("portfolio")
            .endpoint("/metrics")
            .build()
    }));

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let db_pool = connect_database(&settings).await?;
    let config = build_server_config(&settings, db_pool)?;
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "portfolio backend listening");
    server.await
}

#[cfg(test)]
mod tests;
