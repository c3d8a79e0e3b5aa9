//! Domain service behind the login screen.
//!
//! Login only checks that both fields are filled in before asking the
//! identity provider; there is no per-field error report. Problems surface
//! as a single notice.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::auth::{CredentialsError, LoginCredentials};
use super::error::ProviderError;
use super::notice::Notice;
use super::ports::{IdentityProvider, Navigator, Notifier};
use super::submission::InFlight;
use super::user::UserId;

/// Fields on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginField {
    /// Account email address.
    Email,
    /// Account password.
    Password,
}

/// Draft values on the login screen.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

impl LoginForm {
    /// Replace `field` in place.
    pub fn set(&mut self, field: LoginField, value: impl Into<String>) {
        match field {
            LoginField::Email => self.email = value.into(),
            LoginField::Password => self.password = value.into(),
        }
    }

    /// Email as typed.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Events emitted by the login presentation layer.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LoginEvent {
    /// The user typed into a field.
    FieldChanged {
        /// Edited field.
        field: LoginField,
        /// Full new value of the field.
        value: String,
    },
    /// The login button was pressed.
    Submit,
    /// The "forgot password?" link was pressed.
    ForgotPassword,
    /// The "create an account" link was pressed.
    GoToSignUp,
}

impl fmt::Debug for LoginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldChanged { field, value } => {
                let shown: &dyn fmt::Debug = match field {
                    LoginField::Password => &"<redacted>",
                    LoginField::Email => value,
                };
                f.debug_struct("FieldChanged")
                    .field("field", field)
                    .field("value", shown)
                    .finish()
            }
            Self::Submit => f.write_str("Submit"),
            Self::ForgotPassword => f.write_str("ForgotPassword"),
            Self::GoToSignUp => f.write_str("GoToSignUp"),
        }
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A previous attempt is still waiting on the provider.
    Busy,
    /// A field was blank; the provider was not called.
    Incomplete(CredentialsError),
    /// The provider authenticated the account.
    SignedIn(UserId),
    /// The provider refused the credentials.
    Rejected(ProviderError),
}

/// Result of a forgot-password request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// A previous request is still waiting on the provider.
    Busy,
    /// No email was entered.
    MissingEmail,
    /// The provider accepted the request.
    Sent,
    /// The provider refused the request.
    Rejected(ProviderError),
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    /// Current draft values.
    pub form: LoginForm,
    /// A provider call is outstanding.
    pub is_loading: bool,
}

/// Login screen service.
pub struct LoginScreen {
    form: Mutex<LoginForm>,
    loading: AtomicBool,
    identity: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl LoginScreen {
    /// Mount a screen with an empty form.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            form: Mutex::new(LoginForm::default()),
            loading: AtomicBool::new(false),
            identity,
            navigator,
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoginForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new value for `field`.
    pub fn change_field(&self, field: LoginField, value: impl Into<String>) {
        self.lock().set(field, value);
    }

    /// Whether a provider call is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> LoginView {
        LoginView {
            form: self.lock().clone(),
            is_loading: self.is_loading(),
        }
    }

    /// Leave for the sign-up screen.
    pub fn go_to_sign_up(&self) {
        self.navigator.go_to_sign_up();
    }

    /// Authenticate with the entered email and password.
    ///
    /// Holds the screen's single submission slot until the outcome has been
    /// applied.
    pub async fn submit(&self) -> LoginOutcome {
        let Some(_in_flight) = InFlight::try_begin(&self.loading) else {
            debug!("login already in flight; ignoring submit");
            return LoginOutcome::Busy;
        };

        let credentials = {
            let form = self.lock();
            LoginCredentials::try_from_parts(form.email(), form.password())
        };
        let credentials = match credentials {
            Ok(credentials) => credentials,
            Err(err) => {
                debug!(error = %err, "login form incomplete");
                self.notifier
                    .notify(Notice::error("Error", "Please fill in all fields."));
                return LoginOutcome::Incomplete(err);
            }
        };

        match self.identity.sign_in(&credentials).await {
            Ok(user_id) => {
                info!(user_id = %user_id, "signed in");
                self.lock().set(LoginField::Password, String::new());
                self.navigator.go_to_home();
                LoginOutcome::SignedIn(user_id)
            }
            Err(error) => {
                warn!(code = error.code(), "identity provider rejected login");
                self.notifier
                    .notify(Notice::error("Login failed", error.to_string()));
                LoginOutcome::Rejected(error)
            }
        }
    }

    /// Ask the provider to email a reset link for the entered address.
    ///
    /// Shares the submission slot with [`Self::submit`].
    pub async fn forgot_password(&self) -> ResetOutcome {
        let Some(_in_flight) = InFlight::try_begin(&self.loading) else {
            debug!("login screen busy; ignoring reset request");
            return ResetOutcome::Busy;
        };

        let email = self.lock().email().trim().to_owned();
        if email.is_empty() {
            self.notifier.notify(Notice::info(
                "Forgot password",
                "Enter your email to reset your password.",
            ));
            return ResetOutcome::MissingEmail;
        }

        match self.identity.send_password_reset(&email).await {
            Ok(()) => {
                info!("password reset requested");
                self.notifier.notify(Notice::info(
                    "Forgot password",
                    "A reset link will be sent.",
                ));
                ResetOutcome::Sent
            }
            Err(error) => {
                warn!(code = error.code(), "identity provider rejected reset request");
                self.notifier
                    .notify(Notice::error("Forgot password", error.to_string()));
                ResetOutcome::Rejected(error)
            }
        }
    }

    /// Dispatch a presentation event.
    pub async fn handle(&self, event: LoginEvent) {
        match event {
            LoginEvent::FieldChanged { field, value } => self.change_field(field, value),
            LoginEvent::Submit => {
                self.submit().await;
            }
            LoginEvent::ForgotPassword => {
                self.forgot_password().await;
            }
            LoginEvent::GoToSignUp => self.go_to_sign_up(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::error::codes;
    use crate::domain::notice::NoticeKind;
    use crate::domain::ports::{MockIdentityProvider, MockNavigator, MockNotifier};
    use crate::domain::SignUpCredentials;
    use async_trait::async_trait;
    use rstest::rstest;
    use std::future::pending;
    use tokio::sync::Notify;

    fn screen_with(
        identity: MockIdentityProvider,
        navigator: MockNavigator,
        notifier: MockNotifier,
    ) -> LoginScreen {
        LoginScreen::new(Arc::new(identity), Arc::new(navigator), Arc::new(notifier))
    }

    fn expect_notice(kind: NoticeKind) -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(move |notice| notice.kind == kind)
            .times(1)
            .return_const(());
        notifier
    }

    #[rstest]
    #[case("", "secret", CredentialsError::EmptyEmail)]
    #[case("  ", "secret", CredentialsError::EmptyEmail)]
    #[case("ada@example.com", "", CredentialsError::EmptyPassword)]
    #[tokio::test]
    async fn blank_fields_skip_the_provider(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_in().never();
        let screen = screen_with(identity, MockNavigator::new(), expect_notice(NoticeKind::Error));
        screen.change_field(LoginField::Email, email);
        screen.change_field(LoginField::Password, password);

        assert_eq!(screen.submit().await, LoginOutcome::Incomplete(expected));
        assert!(!screen.is_loading());
    }

    #[rstest]
    #[tokio::test]
    async fn successful_login_goes_home_and_forgets_password() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .withf(|creds| creds.email() == "ada@example.com" && creds.password() == "secret")
            .times(1)
            .returning(|_| Ok(UserId::new("uid-7").expect("fixture id")));
        let mut navigator = MockNavigator::new();
        navigator.expect_go_to_home().times(1).return_const(());
        let screen = screen_with(identity, navigator, MockNotifier::new());
        screen.change_field(LoginField::Email, "ada@example.com");
        screen.change_field(LoginField::Password, "secret");

        let outcome = screen.submit().await;

        assert!(matches!(outcome, LoginOutcome::SignedIn(ref id) if id.as_str() == "uid-7"));
        let view = screen.view();
        assert_eq!(view.form.email(), "ada@example.com");
        assert_eq!(view.form.password(), "");
        assert!(!view.is_loading);
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_login_notifies_and_stays() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .times(1)
            .returning(|_| Err(ProviderError::new(codes::INVALID_CREDENTIAL, "bad credentials")));
        let mut navigator = MockNavigator::new();
        navigator.expect_go_to_home().never();
        let screen = screen_with(identity, navigator, expect_notice(NoticeKind::Error));
        screen.change_field(LoginField::Email, "ada@example.com");
        screen.change_field(LoginField::Password, "wrong");

        let outcome = screen.submit().await;

        assert!(matches!(outcome, LoginOutcome::Rejected(ref err) if err.code() == codes::INVALID_CREDENTIAL));
        assert!(!screen.is_loading());
    }

    #[rstest]
    #[tokio::test]
    async fn forgot_password_requires_an_email() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_send_password_reset().never();
        let screen = screen_with(identity, MockNavigator::new(), expect_notice(NoticeKind::Info));

        assert_eq!(screen.forgot_password().await, ResetOutcome::MissingEmail);
    }

    #[rstest]
    #[tokio::test]
    async fn forgot_password_sends_trimmed_email() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_send_password_reset()
            .withf(|email: &str| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(()));
        let screen = screen_with(identity, MockNavigator::new(), expect_notice(NoticeKind::Info));
        screen.change_field(LoginField::Email, " ada@example.com ");

        assert_eq!(screen.forgot_password().await, ResetOutcome::Sent);
    }

    #[rstest]
    #[tokio::test]
    async fn go_to_sign_up_event_navigates() {
        let mut navigator = MockNavigator::new();
        navigator.expect_go_to_sign_up().times(1).return_const(());
        let screen = screen_with(MockIdentityProvider::new(), navigator, MockNotifier::new());

        screen.handle(LoginEvent::GoToSignUp).await;
    }

    /// Provider that parks sign-in and reset calls until released.
    struct GatedIdentity {
        release: Notify,
    }

    #[async_trait]
    impl IdentityProvider for GatedIdentity {
        async fn create_account(&self, _: &SignUpCredentials) -> Result<UserId, ProviderError> {
            pending().await
        }

        async fn sign_in(&self, _: &LoginCredentials) -> Result<UserId, ProviderError> {
            self.release.notified().await;
            UserId::new("gated").map_err(|err| ProviderError::new("test/fixture", err.to_string()))
        }

        async fn send_password_reset(&self, _: &str) -> Result<(), ProviderError> {
            self.release.notified().await;
            Ok(())
        }
    }

    fn gated_screen(
        navigator: MockNavigator,
        notifier: MockNotifier,
    ) -> (Arc<GatedIdentity>, LoginScreen) {
        let identity = Arc::new(GatedIdentity {
            release: Notify::new(),
        });
        let screen = LoginScreen::new(identity.clone(), Arc::new(navigator), Arc::new(notifier));
        screen.change_field(LoginField::Email, "ada@example.com");
        screen.change_field(LoginField::Password, "secret");
        (identity, screen)
    }

    #[rstest]
    #[tokio::test]
    async fn login_in_flight_makes_other_requests_busy() {
        let mut navigator = MockNavigator::new();
        navigator.expect_go_to_home().times(1).return_const(());
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let (identity, screen) = gated_screen(navigator, notifier);

        let (first, (second, reset)) = tokio::join!(screen.submit(), async {
            tokio::task::yield_now().await;
            assert!(screen.is_loading());
            let second = screen.submit().await;
            let reset = screen.forgot_password().await;
            identity.release.notify_one();
            (second, reset)
        });

        assert_eq!(second, LoginOutcome::Busy);
        assert_eq!(reset, ResetOutcome::Busy);
        assert!(matches!(first, LoginOutcome::SignedIn(_)));
        assert!(!screen.is_loading());
    }

    #[rstest]
    #[tokio::test]
    async fn reset_in_flight_makes_login_busy() {
        let mut navigator = MockNavigator::new();
        navigator.expect_go_to_home().never();
        let (identity, screen) = gated_screen(navigator, expect_notice(NoticeKind::Info));

        let (reset, login) = tokio::join!(screen.forgot_password(), async {
            tokio::task::yield_now().await;
            let login = screen.submit().await;
            identity.release.notify_one();
            login
        });

        assert_eq!(login, LoginOutcome::Busy);
        assert_eq!(reset, ResetOutcome::Sent);
        assert_eq!(screen.view().form.password(), "secret");
        assert!(!screen.is_loading());
    }
}
