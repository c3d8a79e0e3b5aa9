//! Failures reported by the identity provider.
//!
//! The provider's codes are opaque strings. A few well-known codes describe a
//! problem with one specific input, and those are routed back onto the
//! matching form slot; everything else is shown as a notice.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error_report::ErrorSlot;

/// Provider codes the screens recognise.
pub mod codes {
    /// Another account already owns the email address.
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    /// The provider rejected the email syntax.
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    /// The provider considers the password too weak.
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    /// Email/password pair did not match an account.
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    /// No account exists for the email address.
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    /// The request never reached the provider.
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
}

/// Opaque `code` + `message` pair returned by a failed provider call.
///
/// # Examples
/// ```
/// use rdv_auth::domain::{ErrorSlot, ProviderError, codes};
///
/// let err = ProviderError::new(codes::EMAIL_ALREADY_IN_USE, "taken");
/// assert_eq!(err.field_error().map(|(slot, _)| slot), Some(ErrorSlot::Email));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    code: String,
    message: String,
}

impl ProviderError {
    /// Build an error from the provider's code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Provider-specific machine-readable code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Provider-supplied human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Form slot and message for codes that blame a single input.
    pub fn field_error(&self) -> Option<(ErrorSlot, &'static str)> {
        match self.code.as_str() {
            codes::EMAIL_ALREADY_IN_USE => Some((ErrorSlot::Email, "email already in use")),
            codes::INVALID_EMAIL => Some((ErrorSlot::Email, "invalid email format")),
            codes::WEAK_PASSWORD => Some((
                ErrorSlot::Password,
                "password must be at least 6 characters",
            )),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ProviderError {}
