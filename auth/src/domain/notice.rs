//! Dismissible notifications raised by the screens.

use serde::{Deserialize, Serialize};

/// Tone of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// An action completed.
    Success,
    /// An action failed and the user should retry or change input.
    Error,
    /// Informational message.
    Info,
}

/// A single notification not tied to any form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Tone used by the presentation layer.
    pub kind: NoticeKind,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notice {
    /// Success notice.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, message)
    }

    /// Error notice.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    /// Informational notice.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}
