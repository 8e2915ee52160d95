//! Local Identity
//!
//! Sign-in is local: a user names themselves and gets a uid derived from the
//! normalised display name, so the same name always maps to the same record.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub display_name: String,
    pub avatar: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn sign_in(display_name: &str, avatar: Option<String>, admin_uids: &[String]) -> DomainResult<Self> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DomainError::InvalidInput("display name is required".to_string()));
        }
        let uid = Self::uid_for(display_name);
        let avatar = avatar.filter(|a| !a.trim().is_empty()).unwrap_or_default();

        Ok(Self {
            is_admin: admin_uids.iter().any(|admin| admin == &uid),
            uid,
            display_name: display_name.to_string(),
            avatar,
        })
    }

    /// Stable uid: first 16 bytes of blake3 over the lowercased, whitespace-collapsed name
    pub fn uid_for(display_name: &str) -> String {
        let normalised = display_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let hash = blake3::hash(normalised.as_bytes());
        hash.to_hex()[..32].to_string()
    }
}
