//! Login service for the single configured administrator account.
//!
//! The password is configured as a SHA-256 hex digest so the plain text
//! never sits in configuration. Submitted passwords are hashed and compared
//! against the digest without early exit.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{AdminId, Error, LoginCredentials};

/// Error raised when the configured credentials are unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminAccountError {
    /// The username is blank.
    #[error("admin username must not be empty")]
    EmptyUsername,
    /// The digest is not 64 hex characters.
    #[error("admin password digest must be 64 hex characters")]
    InvalidDigest,
}

/// Authenticates against one username and password digest.
#[derive(Clone)]
pub struct ConfiguredLoginService {
    admin: AdminId,
    password_sha256: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for ConfiguredLoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredLoginService")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

impl ConfiguredLoginService {
    /// Build the service from a username and hex-encoded SHA-256 digest.
    ///
    /// # Examples
    /// ```
    /// use portfolio::domain::ConfiguredLoginService;
    ///
    /// // sha256("password")
    /// let digest = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
    /// assert!(ConfiguredLoginService::new("admin", digest).is_ok());
    /// assert!(ConfiguredLoginService::new("admin", "not-hex").is_err());
    /// ```
    pub fn new(username: &str, password_sha256_hex: &str) -> Result<Self, AdminAccountError> {
        let admin = AdminId::new(username).map_err(|_| AdminAccountError::EmptyUsername)?;
        let mut digest = Zeroizing::new([0_u8; 32]);
        hex::decode_to_slice(password_sha256_hex.trim(), digest.as_mut_slice())
            .map_err(|_| AdminAccountError::InvalidDigest)?;
        Ok(Self {
            admin,
            password_sha256: digest,
        })
    }

    fn password_matches(&self, password: &str) -> bool {
        let submitted = Sha256::digest(password.as_bytes());
        submitted
            .iter()
            .zip(self.password_sha256.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminId, Error> {
        let username_matches = credentials.username() == self.admin.as_str();
        let password_matches = self.password_matches(credentials.password());
        if username_matches && password_matches {
            tracing::info!(admin = %self.admin, "administrator logged in");
            Ok(self.admin.clone())
        } else {
            tracing::info!(username = credentials.username(), "rejected login attempt");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
