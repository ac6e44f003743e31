//! User-facing notices.

use crate::errors::PresenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Warning,
    Error,
}

/// A notice the host shows to the user, as a dialog or a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Notice for a failure that tore the widget down.
    pub fn from_failure(title: impl Into<String>, error: &PresenceError) -> Self {
        Self::error(title, error.user_message())
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
