//! Driven port for user-facing notifications.

use crate::domain::Notice;

/// Displays a single dismissible notification.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Present `notice` to the user.
    fn notify(&self, notice: Notice);
}
