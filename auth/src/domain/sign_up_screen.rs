//! Domain service behind the sign-up screen.
//!
//! The service owns the draft form, the current error report and the
//! loading/visibility flags. Presentation adapters feed it [`SignUpEvent`]s
//! and render [`SignUpView`] snapshots; the identity provider, navigation and
//! notifications are reached through ports.
//!
//! State sits behind a mutex that is never held across an `.await`, so the
//! screen can keep accepting keystrokes while an account is being created.
//! Only one provider call may be outstanding; extra submits are no-ops.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::auth::SignUpCredentials;
use super::error::ProviderError;
use super::error_report::ErrorReport;
use super::notice::Notice;
use super::ports::{IdentityProvider, Navigator, Notifier};
use super::sign_up_form::{SignUpField, SignUpForm};
use super::submission::InFlight;
use super::user::UserId;
use super::validation::validate;

/// Events emitted by the sign-up presentation layer.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignUpEvent {
    /// The user typed into a field.
    FieldChanged {
        /// Edited field.
        field: SignUpField,
        /// Full new value of the field.
        value: String,
    },
    /// Show or hide the password.
    TogglePasswordVisibility,
    /// Show or hide the password confirmation.
    ToggleConfirmPasswordVisibility,
    /// The create-account button was pressed.
    Submit,
    /// The "already have an account?" link was pressed.
    GoToLogin,
}

impl fmt::Debug for SignUpEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldChanged { field, value } => {
                let shown: &dyn fmt::Debug = if field.is_secret() { &"<redacted>" } else { value };
                f.debug_struct("FieldChanged")
                    .field("field", field)
                    .field("value", shown)
                    .finish()
            }
            Self::TogglePasswordVisibility => f.write_str("TogglePasswordVisibility"),
            Self::ToggleConfirmPasswordVisibility => f.write_str("ToggleConfirmPasswordVisibility"),
            Self::Submit => f.write_str("Submit"),
            Self::GoToLogin => f.write_str("GoToLogin"),
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A previous submit is still waiting on the provider; nothing happened.
    Busy,
    /// Validation failed; the report is now displayed.
    Invalid(ErrorReport),
    /// The provider created the account.
    Created(UserId),
    /// The provider refused the request.
    Rejected(ProviderError),
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpView {
    /// Current draft values.
    pub form: SignUpForm,
    /// Messages displayed next to the inputs.
    pub errors: ErrorReport,
    /// A provider call is outstanding.
    pub is_loading: bool,
    /// Password rendered in clear text.
    pub show_password: bool,
    /// Confirmation rendered in clear text.
    pub show_confirm_password: bool,
}

#[derive(Debug, Default)]
struct SignUpState {
    form: SignUpForm,
    errors: ErrorReport,
    show_password: bool,
    show_confirm_password: bool,
}

/// Sign-up screen service.
pub struct SignUpScreen {
    state: Mutex<SignUpState>,
    loading: AtomicBool,
    identity: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SignUpScreen {
    /// Mount a screen with an empty form.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: Mutex::new(SignUpState::default()),
            loading: AtomicBool::new(false),
            identity,
            navigator,
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SignUpState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new value for `field` and clear that field's stale error.
    ///
    /// Email input is lowercased as it is typed.
    pub fn change_field(&self, field: SignUpField, value: impl Into<String>) {
        let mut value = value.into();
        if field == SignUpField::Email {
            value = value.to_lowercase();
        }

        let mut state = self.lock();
        state.form.set(field, value);
        if state.errors.clear(field.error_slot()) {
            debug!(field = field.as_str(), "cleared stale sign-up error");
        }
    }

    /// Like [`Self::change_field`] for callers holding a raw field name.
    ///
    /// Returns `false`, and changes nothing, when the name is unknown.
    pub fn change_field_named(&self, field: &str, value: impl Into<String>) -> bool {
        match field.parse::<SignUpField>() {
            Ok(field) => {
                self.change_field(field, value);
                true
            }
            Err(err) => {
                debug!(error = %err, "ignoring edit for unknown sign-up field");
                false
            }
        }
    }

    /// Flip password visibility, returning the new state.
    pub fn toggle_password_visibility(&self) -> bool {
        let mut state = self.lock();
        state.show_password = !state.show_password;
        state.show_password
    }

    /// Flip confirmation visibility, returning the new state.
    pub fn toggle_confirm_password_visibility(&self) -> bool {
        let mut state = self.lock();
        state.show_confirm_password = !state.show_confirm_password;
        state.show_confirm_password
    }

    /// Whether a provider call is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SignUpView {
        let state = self.lock();
        SignUpView {
            form: state.form.clone(),
            errors: state.errors.clone(),
            is_loading: self.is_loading(),
            show_password: state.show_password,
            show_confirm_password: state.show_confirm_password,
        }
    }

    /// Leave for the login screen.
    pub fn go_to_login(&self) {
        self.navigator.go_to_login();
    }

    /// Validate the form and, when it passes, create the account.
    ///
    /// The submission slot is claimed before validation and released only
    /// after the outcome has been applied to the screen, so a concurrent
    /// submit never sees a half-updated form and never touches the report.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_in_flight) = InFlight::try_begin(&self.loading) else {
            debug!("sign-up already in flight; ignoring submit");
            return SubmitOutcome::Busy;
        };

        let credentials = {
            let mut state = self.lock();
            let (report, is_valid) = validate(&state.form).into_parts();
            state.errors = report.clone();
            if !is_valid {
                debug!(errors = report.len(), "sign-up form failed validation");
                return SubmitOutcome::Invalid(report);
            }
            match SignUpCredentials::try_from_parts(state.form.email(), state.form.password()) {
                Ok(credentials) => credentials,
                Err(err) => {
                    warn!(error = %err, "validated sign-up form produced unusable credentials");
                    return SubmitOutcome::Invalid(report);
                }
            }
        };

        match self.identity.create_account(&credentials).await {
            Ok(user_id) => {
                info!(user_id = %user_id, "account created");
                *self.lock() = SignUpState::default();
                self.notifier.notify(Notice::success(
                    "Success",
                    "Your account has been created.",
                ));
                self.navigator.go_to_login();
                SubmitOutcome::Created(user_id)
            }
            Err(error) => {
                warn!(code = error.code(), "identity provider rejected sign-up");
                match error.field_error() {
                    Some((slot, message)) => self.lock().errors.insert(slot, message),
                    None => self
                        .notifier
                        .notify(Notice::error("Sign-up failed", error.to_string())),
                }
                SubmitOutcome::Rejected(error)
            }
        }
    }

    /// Dispatch a presentation event. Only [`SignUpEvent::Submit`] yields an
    /// outcome.
    pub async fn handle(&self, event: SignUpEvent) -> Option<SubmitOutcome> {
        match event {
            SignUpEvent::FieldChanged { field, value } => self.change_field(field, value),
            SignUpEvent::TogglePasswordVisibility => {
                self.toggle_password_visibility();
            }
            SignUpEvent::ToggleConfirmPasswordVisibility => {
                self.toggle_confirm_password_visibility();
            }
            SignUpEvent::Submit => return Some(self.submit().await),
            SignUpEvent::GoToLogin => self.go_to_login(),
        }
        None
    }
}
