//! Tauri-backed collaborators
//!
//! Implements the recycle-core source traits over the command bindings and
//! turns the backend's error strings into [`AppError`]s.

use async_trait::async_trait;
use recycle_core::{
    AppError, AppResult, CatalogSource, Category, Identity, Item, LeaderboardSource, Resource, ScoreEntry,
    ScoreStore, UserProfile,
};

use crate::commands;

/// Stateless handle; every call goes through `invoke`
#[derive(Clone, Copy, Default)]
pub struct TauriBackend;

/// Map a failed admin write to the matching error kind
pub fn classify(message: String) -> AppError {
    let kinds: [(&str, fn(String) -> AppError); 3] = [
        ("Not allowed: ", AppError::Forbidden),
        ("Invalid input: ", AppError::Invalid),
        ("Not found: ", AppError::NotFound),
    ];
    for (prefix, kind) in kinds {
        if let Some(rest) = message.strip_prefix(prefix) {
            return kind(rest.to_string());
        }
    }
    AppError::Invalid(message)
}

#[async_trait(?Send)]
impl CatalogSource for TauriBackend {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        commands::list_categories()
            .await
            .map_err(|e| AppError::fetch(Resource::Categories, e))
    }

    async fn list_items(&self, category_id: &str) -> AppResult<Vec<Item>> {
        commands::list_items(category_id)
            .await
            .map_err(|e| AppError::fetch(Resource::Items, e))
    }
}

#[async_trait(?Send)]
impl ScoreStore for TauriBackend {
    async fn read_user_record(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        commands::get_user_record(uid)
            .await
            .map_err(|e| AppError::fetch(Resource::Profile, e))
    }

    async fn create_user_record(&self, identity: &Identity) -> AppResult<UserProfile> {
        commands::create_user_record(identity)
            .await
            .map_err(|e| AppError::fetch(Resource::Profile, e))
    }

    async fn write_score(&self, uid: &str, score: u64) -> AppResult<()> {
        commands::update_score(uid, score).await.map_err(AppError::Persist)
    }
}

#[async_trait(?Send)]
impl LeaderboardSource for TauriBackend {
    async fn top_scores(&self, limit: u32) -> AppResult<Vec<ScoreEntry>> {
        commands::top_scores(limit)
            .await
            .map_err(|e| AppError::fetch(Resource::Leaderboard, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_backend_errors() {
        assert_eq!(
            classify("Not allowed: catalog edits need an admin account".to_string()),
            AppError::Forbidden("catalog edits need an admin account".to_string())
        );
        assert_eq!(
            classify("Invalid input: unknown category x".to_string()),
            AppError::Invalid("unknown category x".to_string())
        );
        assert_eq!(classify("Not found: item 7".to_string()), AppError::NotFound("item 7".to_string()));
        assert_eq!(classify("disk full".to_string()), AppError::Invalid("disk full".to_string()));
    }
}
