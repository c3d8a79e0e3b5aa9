//! Headless navigator and notifier that report through `tracing`.
//!
//! Used by the demo binary and anywhere the screens run without a UI.

use tracing::{info, warn};

use crate::domain::ports::{Navigator, Notifier};
use crate::domain::{Notice, NoticeKind};

/// Navigator that logs each requested destination.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn go_to_login(&self) {
        info!(destination = "login", "navigation requested");
    }

    fn go_to_sign_up(&self) {
        info!(destination = "sign_up", "navigation requested");
    }

    fn go_to_home(&self) {
        info!(destination = "home", "navigation requested");
    }
}

/// Notifier that logs notices instead of displaying them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => warn!(title = %notice.title, message = %notice.message, "notice"),
            NoticeKind::Success | NoticeKind::Info => {
                info!(kind = ?notice.kind, title = %notice.title, message = %notice.message, "notice");
            }
        }
    }
}
