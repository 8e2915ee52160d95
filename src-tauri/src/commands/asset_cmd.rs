//! Tauri Commands for Client Settings and Image Uploads

use tauri::State;
use recycle_core::ClientConfig;
use crate::AppState;

/// Settings the frontend needs at startup
#[tauri::command]
pub async fn get_client_config(state: State<'_, AppState>) -> Result<ClientConfig, String> {
    Ok(state.config.client())
}

/// Store an uploaded image (base64 data URL) and return its asset URL
#[tauri::command]
pub async fn save_image(state: State<'_, AppState>, data: String) -> Result<String, String> {
    state.require_admin().await.map_err(|e| e.to_string())?;
    state.images.save_data_url(&data).map_err(|e| e.to_string())
}
