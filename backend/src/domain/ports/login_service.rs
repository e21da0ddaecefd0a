//! Driving port for administrator authentication.
//!
//! Inbound adapters call this port to exchange credentials for an
//! [`AdminId`] without knowing where the credentials are configured.

use async_trait::async_trait;

use crate::domain::{AdminId, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated administrator.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminId, Error>;
}

/// Authenticator used when no administrator account is configured.
///
/// Every attempt fails with `unauthorized`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLoginService;

#[async_trait]
impl LoginService for DisabledLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminId, Error> {
        tracing::warn!(
            username = credentials.username(),
            "login attempted but no administrator account is configured"
        );
        Err(Error::unauthorized("invalid credentials"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn disabled_login_always_fails_closed() {
        let creds = LoginCredentials::try_from_parts("admin", "password").expect("credentials");
        let err = DisabledLoginService
            .authenticate(&creds)
            .await
            .expect_err("login must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
