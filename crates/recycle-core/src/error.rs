//! Error taxonomy
//!
//! Every failure is caught where the async call resolves and turned into a
//! [`Notice`](crate::notice::Notice); nothing here is allowed to take the UI down.

use std::fmt;

use thiserror::Error;

/// Remote lists the app reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Categories,
    Items,
    Leaderboard,
    Profile,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Categories => "categories",
            Resource::Items => "items",
            Resource::Leaderboard => "scoreboard",
            Resource::Profile => "profile",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Category, item, leaderboard or profile retrieval failed
    #[error("Could not load {resource}: {message}")]
    Fetch { resource: Resource, message: String },

    /// Score write failed; the local score is kept
    #[error("Could not save your score: {0}")]
    Persist(String),

    /// Sign-in or sign-out failed
    #[error("Sign-in failed: {0}")]
    Auth(String),

    /// A record was missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// An admin-only action was attempted without the admin flag
    #[error("Not allowed: {0}")]
    Forbidden(String),

    /// Rejected input, e.g. an item for an unknown category
    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl AppError {
    pub fn fetch(resource: Resource, message: impl Into<String>) -> Self {
        AppError::Fetch {
            resource,
            message: message.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_action() {
        let err = AppError::fetch(Resource::Items, "timeout");
        assert_eq!(err.to_string(), "Could not load items: timeout");

        let err = AppError::Persist("offline".to_string());
        assert!(err.to_string().starts_with("Could not save your score"));
    }
}
