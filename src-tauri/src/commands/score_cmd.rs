//! Tauri Commands for Scores
//!
//! Per-user score records and the public leaderboard.

use tauri::State;
use crate::domain::{Identity, ScoreEntry, UserRecord};
use crate::repository::Repository;
use crate::AppState;

/// Get a user's score record, if one exists
#[tauri::command]
pub async fn get_user_record(state: State<'_, AppState>, uid: String) -> Result<Option<UserRecord>, String> {
    state.user_repo.find_by_id(uid).await.map_err(|e| e.to_string())
}

/// Create the zero-score record for the signed-in user
#[tauri::command]
pub async fn create_user_record(state: State<'_, AppState>, identity: Identity) -> Result<UserRecord, String> {
    state.require_user(&identity.uid).await.map_err(|e| e.to_string())?;

    // Two first drops can race here; the second caller gets the first record
    if let Some(existing) = state.user_repo.find_by_id(identity.uid.clone()).await.map_err(|e| e.to_string())? {
        return Ok(existing);
    }

    let record = UserRecord::new(identity.uid, identity.display_name, identity.avatar);
    let created = state.user_repo.create(&record).await.map_err(|e| e.to_string())?;
    log::info!("Created score record for {}", created.uid);
    Ok(created)
}

/// Overwrite the signed-in user's score
#[tauri::command]
pub async fn update_score(state: State<'_, AppState>, uid: String, score: u64) -> Result<(), String> {
    state.require_user(&uid).await.map_err(|e| e.to_string())?;
    state.user_repo.update_score(&uid, score).await.map_err(|e| e.to_string())?;
    log::debug!("Score for {} is now {}", uid, score);
    Ok(())
}

/// Highest scores first; at most the configured leaderboard size
#[tauri::command]
pub async fn top_scores(state: State<'_, AppState>, limit: Option<u32>) -> Result<Vec<ScoreEntry>, String> {
    let limit = limit.unwrap_or(state.config.leaderboard_limit).min(state.config.leaderboard_limit);
    let records = state.user_repo.top_scores(limit).await.map_err(|e| e.to_string())?;

    Ok(records
        .into_iter()
        .map(|record| ScoreEntry {
            is_admin: state.config.is_admin(&record.uid),
            uid: record.uid,
            display_name: record.display_name,
            avatar: record.avatar,
            score: record.score,
        })
        .collect())
}
