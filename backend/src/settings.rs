//! Application settings loaded via OrthoConfig.
//!
//! Values come from `PORTFOLIO_*` environment variables or the matching
//! command-line flags. Every field is optional; accessors supply defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::rate_limit::{DEFAULT_LIMIT, DEFAULT_WINDOW};
use crate::domain::{AdminAccountError, ConfiguredLoginService, RateLimitPolicy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Only one half of the admin credentials is configured.
    #[error("PORTFOLIO_ADMIN_USERNAME and PORTFOLIO_ADMIN_PASSWORD_SHA256 must be set together")]
    PartialAdminAccount,
    /// The admin credentials are present but unusable.
    #[error("invalid admin account: {0}")]
    AdminAccount(#[from] AdminAccountError),
}

/// Configuration values for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTFOLIO")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// Contact submissions accepted per client per window.
    pub contact_rate_limit: Option<u32>,
    /// Rate-limit window length in seconds.
    pub contact_rate_window_secs: Option<u64>,
    /// Trust `Forwarded` / `X-Forwarded-For` when keying the rate limiter.
    #[ortho_config(default = false)]
    pub trust_forwarded_for: bool,
    /// Administrator username.
    pub admin_username: Option<String>,
    /// Hex-encoded SHA-256 of the administrator password.
    pub admin_password_sha256: Option<String>,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Rate-limit policy for contact submissions.
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy::new(
            self.contact_rate_limit.unwrap_or(DEFAULT_LIMIT),
            self.contact_rate_window_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_WINDOW),
        )
    }

    /// The configured administrator account, if any.
    ///
    /// Returns `Ok(None)` when neither credential is set so the login
    /// endpoint fails closed.
    pub fn admin_account(&self) -> Result<Option<ConfiguredLoginService>, SettingsError> {
        match (
            self.admin_username.as_deref(),
            self.admin_password_sha256.as_deref(),
        ) {
            (Some(username), Some(digest)) => {
                Ok(Some(ConfiguredLoginService::new(username, digest)?))
            }
            (None, None) => Ok(None),
            _ => Err(SettingsError::PartialAdminAccount),
        }
    }
}
