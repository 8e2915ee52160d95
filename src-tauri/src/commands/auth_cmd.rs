//! Tauri Commands for Local Sign-In
//!
//! Every change is broadcast as `auth-state-changed` with the identity, or
//! `null` after sign-out.

use tauri::{AppHandle, Emitter, State};
use crate::domain::{Identity, UserRecord};
use crate::repository::Repository;
use crate::AppState;

pub const AUTH_STATE_CHANGED: &str = "auth-state-changed";

#[tauri::command]
pub async fn sign_in(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    display_name: String,
    avatar: Option<String>,
) -> Result<Identity, String> {
    let identity = Identity::sign_in(&display_name, avatar, &state.config.admin_uids)
        .map_err(|e| e.to_string())?;

    // Keep the leaderboard name current for returning users
    if let Some(record) = state.user_repo.find_by_id(identity.uid.clone()).await.map_err(|e| e.to_string())? {
        if record.display_name != identity.display_name || record.avatar != identity.avatar {
            let refreshed = UserRecord {
                display_name: identity.display_name.clone(),
                avatar: identity.avatar.clone(),
                ..record
            };
            state.user_repo.update(&refreshed).await.map_err(|e| e.to_string())?;
        }
    }

    state.set_current_user(Some(identity.clone())).await;
    log::info!("Signed in {} (admin: {})", identity.uid, identity.is_admin);

    app_handle.emit(AUTH_STATE_CHANGED, Some(&identity)).map_err(|e| e.to_string())?;
    Ok(identity)
}

#[tauri::command]
pub async fn sign_out(app_handle: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    if let Some(identity) = state.current_user().await {
        log::info!("Signed out {}", identity.uid);
    }
    state.set_current_user(None).await;

    app_handle.emit(AUTH_STATE_CHANGED, None::<Identity>).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn current_user(state: State<'_, AppState>) -> Result<Option<Identity>, String> {
    Ok(state.current_user().await)
}
