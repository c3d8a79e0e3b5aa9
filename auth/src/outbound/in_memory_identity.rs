//! In-memory identity provider used for development and demos.
//!
//! Accounts live in a process-local map keyed by lowercased email. The
//! adapter mimics the provider's error codes so screens exercise the same
//! paths they would against the real service.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::config::IdentityConfig;
use crate::domain::ports::IdentityProvider;
use crate::domain::{
    LoginCredentials, PASSWORD_MIN_LEN, ProviderError, SignUpCredentials, UserId, codes,
    password_length,
};

struct Account {
    user_id: UserId,
    password: Zeroizing<String>,
}

/// Identity provider keeping accounts in memory.
pub struct InMemoryIdentityProvider {
    project_id: String,
    latency: Duration,
    accounts: Mutex<HashMap<String, Account>>,
    reset_requests: Mutex<Vec<String>>,
}

impl InMemoryIdentityProvider {
    /// Build a provider for the configured project.
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            project_id: config.project_id().to_owned(),
            latency: config.simulated_latency(),
            accounts: Mutex::new(HashMap::new()),
            reset_requests: Mutex::new(Vec::new()),
        }
    }

    /// Pre-register an account.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        lock(&self.accounts).insert(
            email.trim().to_lowercase(),
            Account {
                user_id: UserId::random(),
                password: Zeroizing::new(password.to_owned()),
            },
        );
        self
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        lock(&self.accounts).len()
    }

    /// Emails that requested a password reset, oldest first.
    pub fn reset_requests(&self) -> Vec<String> {
        lock(&self.reset_requests).clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(
        &self,
        credentials: &SignUpCredentials,
    ) -> Result<UserId, ProviderError> {
        self.simulate_latency().await;

        if password_length(credentials.password()) < PASSWORD_MIN_LEN {
            return Err(ProviderError::new(
                codes::WEAK_PASSWORD,
                "Password should be at least 6 characters.",
            ));
        }

        let key = credentials.email().to_lowercase();
        let mut accounts = lock(&self.accounts);
        if accounts.contains_key(&key) {
            debug!(project = %self.project_id, "sign-up for existing email refused");
            return Err(ProviderError::new(
                codes::EMAIL_ALREADY_IN_USE,
                "The email address is already in use by another account.",
            ));
        }

        let user_id = UserId::random();
        accounts.insert(
            key,
            Account {
                user_id: user_id.clone(),
                password: Zeroizing::new(credentials.password().to_owned()),
            },
        );
        info!(project = %self.project_id, user_id = %user_id, "account registered");
        Ok(user_id)
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<UserId, ProviderError> {
        self.simulate_latency().await;

        let accounts = lock(&self.accounts);
        match accounts.get(&credentials.email().to_lowercase()) {
            Some(account) if account.password.as_str() == credentials.password() => {
                Ok(account.user_id.clone())
            }
            _ => Err(ProviderError::new(
                codes::INVALID_CREDENTIAL,
                "The supplied auth credential is incorrect.",
            )),
        }
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        self.simulate_latency().await;

        debug!(project = %self.project_id, "password reset requested");
        lock(&self.reset_requests).push(email.to_lowercase());
        Ok(())
    }
}
