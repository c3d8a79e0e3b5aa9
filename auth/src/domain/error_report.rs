//! Per-field error messages shown beside the sign-up inputs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::sign_up_form::SignUpField;

/// Error slot paired with one validated sign-up field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSlot {
    /// Problems with the given name.
    #[serde(rename = "firstNameError")]
    FirstName,
    /// Problems with the family name.
    #[serde(rename = "lastNameError")]
    LastName,
    /// Problems with the email address.
    #[serde(rename = "emailError")]
    Email,
    /// Problems with the password.
    #[serde(rename = "passwordError")]
    Password,
    /// Problems with the password confirmation.
    #[serde(rename = "confirmPasswordError")]
    ConfirmPassword,
}

impl ErrorSlot {
    /// Every slot in display order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Slot name as serialised for the presentation layer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstNameError",
            Self::LastName => "lastNameError",
            Self::Email => "emailError",
            Self::Password => "passwordError",
            Self::ConfirmPassword => "confirmPasswordError",
        }
    }

    /// Form field this slot reports on.
    pub const fn field(self) -> SignUpField {
        match self {
            Self::FirstName => SignUpField::FirstName,
            Self::LastName => SignUpField::LastName,
            Self::Email => SignUpField::Email,
            Self::Password => SignUpField::Password,
            Self::ConfirmPassword => SignUpField::ConfirmPassword,
        }
    }
}

impl fmt::Display for ErrorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a presentation field name to its error slot.
///
/// Unknown names yield `None` so callers can skip the clear step instead of
/// failing.
///
/// # Examples
/// ```
/// use rdv_auth::{ErrorSlot, map_field_to_error_slot};
///
/// assert_eq!(map_field_to_error_slot("confirmPassword"), Some(ErrorSlot::ConfirmPassword));
/// assert_eq!(map_field_to_error_slot("username"), None);
/// ```
pub fn map_field_to_error_slot(field: &str) -> Option<ErrorSlot> {
    field
        .parse::<SignUpField>()
        .ok()
        .map(SignUpField::error_slot)
}

/// Validation messages keyed by [`ErrorSlot`].
///
/// Slots without an entry have no error. Empty messages are never stored, so
/// an empty report is exactly a valid one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorReport(BTreeMap<ErrorSlot, String>);

impl ErrorReport {
    /// Create a report with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Message for `slot`, or the empty string when there is none.
    pub fn message(&self, slot: ErrorSlot) -> &str {
        self.0.get(&slot).map_or("", String::as_str)
    }

    /// Whether `slot` currently carries a message.
    pub fn has_error(&self, slot: ErrorSlot) -> bool {
        self.0.contains_key(&slot)
    }

    /// Store `message` in `slot`. An empty message clears the slot.
    pub fn insert(&mut self, slot: ErrorSlot, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.0.remove(&slot);
        } else {
            self.0.insert(slot, message);
        }
    }

    /// Clear `slot`, returning `true` when a message was removed.
    pub fn clear(&mut self, slot: ErrorSlot) -> bool {
        self.0.remove(&slot).is_some()
    }

    /// `true` when every slot is empty.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of slots carrying a message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no slot carries a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Populated slots in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorSlot, &str)> {
        self.0.iter().map(|(slot, message)| (*slot, message.as_str()))
    }
}
