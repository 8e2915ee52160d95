//! User Score Records
//!
//! One record per signed-in user, keyed by the identity provider's uid.
//! The score is the only mutable numeric field.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Leaderboard never returns more rows than this
pub const MAX_LEADERBOARD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    pub display_name: String,
    pub avatar: String,
    pub score: u64,
    /// Milliseconds since epoch
    pub last_updated_at: i64,
}

impl UserRecord {
    pub fn new(uid: String, display_name: String, avatar: String) -> Self {
        Self {
            uid,
            display_name,
            avatar,
            score: 0,
            last_updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Entity for UserRecord {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.uid.clone()
    }
}

/// Public leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub uid: String,
    pub display_name: String,
    pub avatar: String,
    pub score: u64,
    pub is_admin: bool,
}
