//! Identity provider configuration loaded via OrthoConfig.
//!
//! Settings are read once at startup (CLI, `IDENTITY_*` environment
//! variables, config file), validated into an [`IdentityConfig`] and
//! installed process-wide. Only the identity adapter consumes it; form and
//! validation code never read configuration.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

static IDENTITY_CONFIG: OnceLock<IdentityConfig> = OnceLock::new();

/// Raw identity provider settings as loaded from the environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "IDENTITY")]
pub struct IdentitySettings {
    /// Public API key of the provider project.
    pub api_key: Option<String>,
    /// Domain hosting the provider's auth handlers.
    pub auth_domain: Option<String>,
    /// Provider project identifier.
    pub project_id: Option<String>,
    /// Storage bucket attached to the project.
    pub storage_bucket: Option<String>,
    /// Sender id used for push messaging.
    pub messaging_sender_id: Option<String>,
    /// Application id registered with the provider.
    pub app_id: Option<String>,
    /// Analytics measurement id.
    pub measurement_id: Option<String>,
    /// Artificial delay added to every provider call, in milliseconds.
    pub simulated_latency_ms: Option<u64>,
}

/// Failures while loading or installing the identity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `api_key` was missing or blank.
    #[error("identity api key is not configured")]
    MissingApiKey,
    /// `project_id` was missing or blank.
    #[error("identity project id is not configured")]
    MissingProjectId,
    /// [`IdentityConfig::install`] was called twice.
    #[error("identity configuration is already initialised")]
    AlreadyInitialised,
    /// The settings layers could not be read.
    #[error("failed to load identity settings: {message}")]
    Load {
        /// Loader error text.
        message: String,
    },
}

/// Validated identity provider configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    api_key: String,
    auth_domain: String,
    project_id: String,
    storage_bucket: Option<String>,
    messaging_sender_id: Option<String>,
    app_id: Option<String>,
    measurement_id: Option<String>,
    simulated_latency: Duration,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl IdentityConfig {
    /// Load settings from the process environment and validate them.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = IdentitySettings::load_from_iter([std::ffi::OsString::from("rdv-auth")])
            .map_err(|err| ConfigError::Load {
                message: err.to_string(),
            })?;
        Self::try_from(settings)
    }

    /// Install this configuration for the rest of the process.
    ///
    /// Fails with [`ConfigError::AlreadyInitialised`] on a second call.
    pub fn install(self) -> Result<&'static Self, ConfigError> {
        IDENTITY_CONFIG
            .set(self)
            .map_err(|_| ConfigError::AlreadyInitialised)?;
        IDENTITY_CONFIG.get().ok_or(ConfigError::AlreadyInitialised)
    }

    /// Configuration installed at startup, if any.
    pub fn installed() -> Option<&'static Self> {
        IDENTITY_CONFIG.get()
    }

    /// Public API key of the provider project.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Domain hosting the provider's auth handlers.
    pub fn auth_domain(&self) -> &str {
        &self.auth_domain
    }

    /// Provider project identifier.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Storage bucket attached to the project.
    pub fn storage_bucket(&self) -> Option<&str> {
        self.storage_bucket.as_deref()
    }

    /// Sender id used for push messaging.
    pub fn messaging_sender_id(&self) -> Option<&str> {
        self.messaging_sender_id.as_deref()
    }

    /// Application id registered with the provider.
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    /// Analytics measurement id.
    pub fn measurement_id(&self) -> Option<&str> {
        self.measurement_id.as_deref()
    }

    /// Delay added to every provider call.
    pub fn simulated_latency(&self) -> Duration {
        self.simulated_latency
    }
}

impl TryFrom<IdentitySettings> for IdentityConfig {
    type Error = ConfigError;

    fn try_from(settings: IdentitySettings) -> Result<Self, Self::Error> {
        let api_key = non_blank(settings.api_key).ok_or(ConfigError::MissingApiKey)?;
        let project_id = non_blank(settings.project_id).ok_or(ConfigError::MissingProjectId)?;
        let auth_domain = non_blank(settings.auth_domain)
            .unwrap_or_else(|| format!("{project_id}.firebaseapp.com"));

        Ok(Self {
            api_key,
            auth_domain,
            project_id,
            storage_bucket: non_blank(settings.storage_bucket),
            messaging_sender_id: non_blank(settings.messaging_sender_id),
            app_id: non_blank(settings.app_id),
            measurement_id: non_blank(settings.measurement_id),
            simulated_latency: Duration::from_millis(settings.simulated_latency_ms.unwrap_or(0)),
        })
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .field("measurement_id", &self.measurement_id)
            .field("simulated_latency", &self.simulated_latency)
            .finish()
    }
}
