//! Transient user notices ("toasts").

use crate::error::AppError;

/// How long a notice stays on screen before auto-dismissal
pub const NOTICE_TTL_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(id: u32, level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id,
            level,
            message: message.into(),
        }
    }

    pub fn from_error(id: u32, err: &AppError) -> Self {
        Self::new(id, NoticeLevel::Error, err.to_string())
    }

    pub fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "notice info",
            NoticeLevel::Success => "notice success",
            NoticeLevel::Error => "notice error",
        }
    }
}
