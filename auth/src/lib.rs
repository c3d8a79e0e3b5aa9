//! Authentication core for the sign-up and login screens.
//!
//! The crate is split the same way as a hexagon: `domain` owns form state,
//! validation, the screen services and the ports they call; `outbound` holds
//! the driven adapters (identity provider, navigation and notification
//! collaborators); `config` loads the identity provider settings once at
//! startup.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::{ConfigError, IdentityConfig, IdentitySettings};
pub use domain::{
    ErrorReport, ErrorSlot, LoginScreen, SignUpField, SignUpForm, SignUpScreen, SubmitOutcome,
    map_field_to_error_slot, validate,
};
