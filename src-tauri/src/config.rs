//! Application Configuration
//!
//! Read once at startup from `recycle.toml` in the app config directory.
//! Every key is optional.

use serde::Deserialize;
use std::path::Path;

use recycle_core::ClientConfig;
use crate::domain::MAX_LEADERBOARD;

pub const CONFIG_FILE: &str = "recycle.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Identities allowed to edit the catalog
    pub admin_uids: Vec<String>,
    /// Quiet period before a score change is written
    pub score_debounce_ms: u64,
    pub leaderboard_limit: u32,
    /// Relative to the app data directory
    pub database_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_uids: Vec::new(),
            score_debounce_ms: 1500,
            leaderboard_limit: MAX_LEADERBOARD,
            database_file: "recycle.db".to_string(),
        }
    }
}

impl AppConfig {
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        let mut config: AppConfig = toml::from_str(raw)?;
        config.leaderboard_limit = config.leaderboard_limit.clamp(1, MAX_LEADERBOARD);
        Ok(config)
    }

    /// Load from `dir/recycle.toml`, falling back to defaults
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::parse(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn is_admin(&self, uid: &str) -> bool {
        self.admin_uids.iter().any(|admin| admin == uid)
    }

    /// The part of the configuration the frontend needs
    pub fn client(&self) -> ClientConfig {
        ClientConfig {
            score_debounce_ms: self.score_debounce_ms,
            leaderboard_limit: self.leaderboard_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "admin_uids = [\"abc\"]\nscore_debounce_ms = 800\n").unwrap();

        let config = AppConfig::load(dir.path());
        assert!(config.is_admin("abc"));
        assert!(!config.is_admin("xyz"));
        assert_eq!(config.score_debounce_ms, 800);
        assert_eq!(config.leaderboard_limit, 10);
        assert_eq!(config.database_file, "recycle.db");
    }

    #[test]
    fn test_leaderboard_limit_clamped() {
        assert_eq!(AppConfig::parse("leaderboard_limit = 50").unwrap().leaderboard_limit, 10);
        assert_eq!(AppConfig::parse("leaderboard_limit = 0").unwrap().leaderboard_limit, 1);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "score_debounce_ms = \"soon\"").unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
    }

    #[test]
    fn test_client_config() {
        let client = AppConfig::default().client();
        assert_eq!(client.score_debounce_ms, 1500);
        assert_eq!(client.leaderboard_limit, 10);
    }
}
