//! Draft values entered on the sign-up screen.
//!
//! The form holds free text until it is validated; nothing is enforced at
//! rest. Updates are keyed by [`SignUpField`] so every field is covered at
//! compile time instead of patching a string-indexed map.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error_report::ErrorSlot;

/// Fields a user can edit on the sign-up screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignUpField {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Account email address.
    Email,
    /// Chosen password.
    Password,
    /// Repeated password used to catch typos.
    ConfirmPassword,
}

impl SignUpField {
    /// Every field in display order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Field name as emitted by the presentation layer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Error slot that reports problems with this field.
    ///
    /// # Examples
    /// ```
    /// use rdv_auth::{ErrorSlot, SignUpField};
    ///
    /// assert_eq!(SignUpField::Email.error_slot(), ErrorSlot::Email);
    /// ```
    pub const fn error_slot(self) -> ErrorSlot {
        match self {
            Self::FirstName => ErrorSlot::FirstName,
            Self::LastName => ErrorSlot::LastName,
            Self::Email => ErrorSlot::Email,
            Self::Password => ErrorSlot::Password,
            Self::ConfirmPassword => ErrorSlot::ConfirmPassword,
        }
    }

    /// Whether the field holds a secret that must stay out of logs.
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

impl fmt::Display for SignUpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a field name does not belong to the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sign-up field: {name}")]
pub struct UnknownFieldError {
    /// Name that failed to parse.
    pub name: String,
}

impl FromStr for SignUpField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(Self::FirstName),
            "lastName" | "last_name" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "confirmPassword" | "confirm_password" => Ok(Self::ConfirmPassword),
            other => Err(UnknownFieldError {
                name: other.to_owned(),
            }),
        }
    }
}

/// Draft registration values.
///
/// # Examples
/// ```
/// use rdv_auth::{SignUpField, SignUpForm};
///
/// let form = SignUpForm::default().update(SignUpField::FirstName, "Jo");
/// assert_eq!(form.value(SignUpField::FirstName), "Jo");
/// assert_eq!(form.value(SignUpField::LastName), "");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    confirm_password: String,
}

impl SignUpForm {
    /// Return a copy of the form with `field` replaced by `value`.
    #[must_use]
    pub fn update(mut self, field: SignUpField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Replace `field` in place. Any text is accepted, including the empty
    /// string.
    pub fn set(&mut self, field: SignUpField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Current value of `field`.
    pub fn value(&self, field: SignUpField) -> &str {
        match field {
            SignUpField::FirstName => &self.first_name,
            SignUpField::LastName => &self.last_name,
            SignUpField::Email => &self.email,
            SignUpField::Password => &self.password,
            SignUpField::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Email address as typed.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Password confirmation as typed.
    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    fn slot_mut(&mut self, field: SignUpField) -> &mut String {
        match field {
            SignUpField::FirstName => &mut self.first_name,
            SignUpField::LastName => &mut self.last_name,
            SignUpField::Email => &mut self.email,
            SignUpField::Password => &mut self.password,
            SignUpField::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}
