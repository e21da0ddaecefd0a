//! Prometheus adapters for domain metrics ports.
//!
//! Compiled only with the `metrics` feature.

mod prometheus_contact;

pub use prometheus_contact::PrometheusContactMetrics;
