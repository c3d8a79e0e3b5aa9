//! Sign-up form validation.
//!
//! Every rule runs on every submit; one field failing never hides another
//! field's message. The resulting [`ErrorReport`] replaces the previous one
//! wholesale.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::error_report::{ErrorReport, ErrorSlot};
use super::sign_up_form::SignUpForm;

/// Minimum password length, as measured by [`password_length`].
pub const PASSWORD_MIN_LEN: usize = 6;

/// Password length in UTF-16 code units.
///
/// This is the length the identity provider and the mobile text inputs
/// report, so a character outside the Basic Multilingual Plane counts twice.
///
/// ```
/// use rdv_auth::domain::validation::password_length;
///
/// assert_eq!(password_length("secret"), 6);
/// assert_eq!(password_length("\u{1F600}"), 2);
/// ```
pub fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

/// A single rule violation on the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignUpValidationError {
    /// Given name blank once trimmed.
    #[error("first name required")]
    FirstNameRequired,
    /// Family name blank once trimmed.
    #[error("last name required")]
    LastNameRequired,
    /// Email blank once trimmed.
    #[error("email required")]
    EmailRequired,
    /// Email does not look like `local@domain.tld`.
    #[error("invalid email format")]
    InvalidEmailFormat,
    /// Password empty.
    #[error("password required")]
    PasswordRequired,
    /// Password shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Confirmation empty.
    #[error("confirm your password")]
    ConfirmPasswordRequired,
    /// Confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl SignUpValidationError {
    /// Slot the message is displayed in.
    pub const fn slot(self) -> ErrorSlot {
        match self {
            Self::FirstNameRequired => ErrorSlot::FirstName,
            Self::LastNameRequired => ErrorSlot::LastName,
            Self::EmailRequired | Self::InvalidEmailFormat => ErrorSlot::Email,
            Self::PasswordRequired | Self::PasswordTooShort { .. } => ErrorSlot::Password,
            Self::ConfirmPasswordRequired | Self::PasswordMismatch => ErrorSlot::ConfirmPassword,
        }
    }
}

/// Outcome of validating a [`SignUpForm`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    errors: Vec<SignUpValidationError>,
    report: ErrorReport,
}

impl Validation {
    /// Full report, empty slots included.
    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    /// Individual violations in field order.
    pub fn errors(&self) -> &[SignUpValidationError] {
        &self.errors
    }

    /// `true` iff every slot of the report is empty.
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Split into the report and the pass/fail flag.
    pub fn into_parts(self) -> (ErrorReport, bool) {
        let is_valid = self.report.is_valid();
        (self.report, is_valid)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Loose `local@domain.tld` check; not a full RFC 5322 parser.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate every field of `form`.
///
/// Pure and deterministic: the same form always produces the same report.
///
/// # Examples
/// ```
/// use rdv_auth::{ErrorSlot, SignUpField, SignUpForm, validate};
///
/// let form = SignUpForm::default()
///     .update(SignUpField::FirstName, "Jo")
///     .update(SignUpField::LastName, "Doe")
///     .update(SignUpField::Email, "a@b.com")
///     .update(SignUpField::Password, "abc")
///     .update(SignUpField::ConfirmPassword, "abc");
/// let validation = validate(&form);
/// assert!(!validation.is_valid());
/// assert_eq!(
///     validation.report().message(ErrorSlot::Password),
///     "password must be at least 6 characters",
/// );
/// ```
pub fn validate(form: &SignUpForm) -> Validation {
    let errors: Vec<_> = [
        check_first_name(form.first_name()),
        check_last_name(form.last_name()),
        check_email(form.email()),
        check_password(form.password()),
        check_confirm_password(form.password(), form.confirm_password()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut report = ErrorReport::new();
    for error in &errors {
        report.insert(error.slot(), error.to_string());
    }

    Validation { errors, report }
}

fn check_first_name(value: &str) -> Option<SignUpValidationError> {
    value
        .trim()
        .is_empty()
        .then_some(SignUpValidationError::FirstNameRequired)
}

fn check_last_name(value: &str) -> Option<SignUpValidationError> {
    value
        .trim()
        .is_empty()
        .then_some(SignUpValidationError::LastNameRequired)
}

fn check_email(value: &str) -> Option<SignUpValidationError> {
    if value.trim().is_empty() {
        Some(SignUpValidationError::EmailRequired)
    } else if !is_valid_email(value) {
        Some(SignUpValidationError::InvalidEmailFormat)
    } else {
        None
    }
}

fn check_password(value: &str) -> Option<SignUpValidationError> {
    if value.is_empty() {
        Some(SignUpValidationError::PasswordRequired)
    } else if password_length(value) < PASSWORD_MIN_LEN {
        Some(SignUpValidationError::PasswordTooShort {
            min: PASSWORD_MIN_LEN,
        })
    } else {
        None
    }
}

fn check_confirm_password(password: &str, confirmation: &str) -> Option<SignUpValidationError> {
    if confirmation.is_empty() {
        Some(SignUpValidationError::ConfirmPasswordRequired)
    } else if confirmation != password {
        Some(SignUpValidationError::PasswordMismatch)
    } else {
        None
    }
}
