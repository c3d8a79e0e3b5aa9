//! Shared helpers for the screen integration tests.
//!
//! Each file under `tests/` compiles as its own crate, so the doubles and
//! configuration builders live here and are pulled in with `mod support;`.

pub mod doubles;

use rdv_auth::{IdentityConfig, IdentitySettings};

/// Identity configuration with no simulated latency.
pub fn test_config() -> IdentityConfig {
    IdentityConfig::try_from(IdentitySettings {
        api_key: Some("test-key".into()),
        auth_domain: None,
        project_id: Some("rdv-test".into()),
        storage_bucket: None,
        messaging_sender_id: None,
        app_id: None,
        measurement_id: None,
        simulated_latency_ms: None,
    })
    .expect("test identity config should be valid")
}
