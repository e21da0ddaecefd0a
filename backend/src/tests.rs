//! Tests for the backend application bootstrap, covering metrics
//! initialisation, configuration assembly and readiness signalling.

#[cfg(feature = "metrics")]
use super::{PrometheusMetricsBuilder, initialize_metrics};
use super::{build_server_config, create_server};
use actix_web::web;
use portfolio::inbound::http::client_key::ClientAddressPolicy;
use portfolio::inbound::http::health::HealthState;
use portfolio::settings::AppSettings;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn settings() -> AppSettings {
    AppSettings {
        bind_addr: Some("127.0.0.1:0".to_owned()),
        database_url: None,
        db_pool_max_size: None,
        contact_rate_limit: Some(3),
        contact_rate_window_secs: Some(3600),
        trust_forwarded_for: false,
        admin_username: None,
        admin_password_sha256: None,
    }
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_none_on_error() {
    let metrics = initialize_metrics(|| -> Result<_, &str> { Err("boom") });
    assert!(metrics.is_none(), "expected metrics to be absent on error");
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_metrics_on_success() {
    let metrics = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("test")
            .endpoint("/metrics")
            .build()
    });

    assert!(
        metrics.is_some(),
        "expected metrics to be present on success"
    );
}

#[rstest]
fn trusted_proxy_setting_selects_forwarded_headers(settings: AppSettings) {
    let settings = AppSettings {
        trust_forwarded_for: true,
        ..settings
    };
    let config = build_server_config(&settings, None).expect("config");
    assert_eq!(config.client_address, ClientAddressPolicy::ForwardedHeaders);
}

#[rstest]
fn partial_admin_account_aborts_startup(settings: AppSettings) {
    let settings = AppSettings {
        admin_username: Some("owner".to_owned()),
        ..settings
    };
    assert!(build_server_config(&settings, None).is_err());
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, settings: AppSettings) {
    assert!(!health_state.is_ready(), "state should start unready");

    let config = build_server_config(&settings, None).expect("config");
    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}
