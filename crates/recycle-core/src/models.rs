//! Shared Models
//!
//! Data structures matching the backend records.

use serde::{Deserialize, Serialize};

/// A waste-type grouping, e.g. "Plastic"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// A recyclable object with its educational metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub image: String,
    /// Free text, e.g. "450 years"
    pub decompose_time: String,
    /// Environmental damage, in display order
    #[serde(default)]
    pub results: Option<Vec<String>>,
    /// Benefits when recycled properly
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
}

/// Who the identity provider says is signed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub display_name: String,
    pub avatar: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// A user's persisted record joined with their identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub display_name: String,
    pub avatar: String,
    pub score: u64,
    #[serde(default)]
    pub is_admin: bool,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub uid: String,
    pub display_name: String,
    pub avatar: String,
    pub score: u64,
    #[serde(default)]
    pub is_admin: bool,
}

/// Settings the backend hands to the frontend at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub score_debounce_ms: u64,
    pub leaderboard_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            score_debounce_ms: 1500,
            leaderboard_limit: 10,
        }
    }
}
