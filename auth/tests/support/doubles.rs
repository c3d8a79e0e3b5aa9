//! Recording doubles for the navigation, notification and identity ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rdv_auth::domain::ports::{IdentityProvider, Navigator, Notifier};
use rdv_auth::domain::{
    LoginCredentials, Notice, ProviderError, SignUpCredentials, UserId,
};

/// Screen a navigator was asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    SignUp,
    Home,
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    calls: Arc<Mutex<Vec<Destination>>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<Destination> {
        self.calls.lock().expect("navigator calls lock").clone()
    }

    fn record(&self, destination: Destination) {
        self.calls
            .lock()
            .expect("navigator calls lock")
            .push(destination);
    }
}

impl Navigator for RecordingNavigator {
    fn go_to_login(&self) {
        self.record(Destination::Login);
    }

    fn go_to_sign_up(&self) {
        self.record(Destination::SignUp);
    }

    fn go_to_home(&self) {
        self.record(Destination::Home);
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notifier lock").push(notice);
    }
}

/// Identity provider that fails every call with a fixed error.
#[derive(Clone)]
pub struct FailingIdentityProvider {
    error: ProviderError,
    calls: Arc<Mutex<usize>>,
}

impl FailingIdentityProvider {
    pub fn new(error: ProviderError) -> Self {
        Self {
            error,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("identity calls lock")
    }

    fn fail<T>(&self) -> Result<T, ProviderError> {
        *self.calls.lock().expect("identity calls lock") += 1;
        Err(self.error.clone())
    }
}

#[async_trait]
impl IdentityProvider for FailingIdentityProvider {
    async fn create_account(&self, _: &SignUpCredentials) -> Result<UserId, ProviderError> {
        self.fail()
    }

    async fn sign_in(&self, _: &LoginCredentials) -> Result<UserId, ProviderError> {
        self.fail()
    }

    async fn send_password_reset(&self, _: &str) -> Result<(), ProviderError> {
        self.fail()
    }
}
