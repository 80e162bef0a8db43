use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "Info"),
            NoticeLevel::Success => write!(f, "Success"),
            NoticeLevel::Error => write!(f, "Error"),
        }
    }
}

/// A transient notification produced by a state transition.
///
/// Frontends decide how to show it (toast, status line, dialog); the core
/// only says what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
