//! Transient user-facing messages.

use std::fmt;
use std::time::Duration;

/// How long an inline banner stays up.
pub const BANNER_DISMISS: Duration = Duration::from_millis(3000);
/// How long the centered success message stays up.
pub const SUCCESS_DISMISS: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A message shown to the guest that goes away on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            dismiss_after: SUCCESS_DISMISS,
        }
    }

    pub fn banner(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            dismiss_after: BANNER_DISMISS,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
