//! Driven port for the external identity provider.
//!
//! Screens only know this trait. Adapters translate to the provider SDK or
//! REST API and report failures as opaque [`ProviderError`] pairs; no retry
//! happens behind this boundary.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, ProviderError, SignUpCredentials, UserId};

/// Account operations offered by the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Open a new account and return its identifier.
    async fn create_account(
        &self,
        credentials: &SignUpCredentials,
    ) -> Result<UserId, ProviderError>;

    /// Authenticate an existing account.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<UserId, ProviderError>;

    /// Ask the provider to email a password reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;
}
