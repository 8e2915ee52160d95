//! Recycle Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::{Emitter, Manager};

mod config;
mod domain;
mod images;
mod repository;
mod state;
mod commands;

use config::AppConfig;
use images::{ImageStore, IMAGES_DIR};
use repository::{init_db, DbState};

pub use state::AppState;

fn app_data_dir(app_handle: &tauri::AppHandle) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

fn respond(responder: tauri::UriSchemeResponder, status: u16, mime: &str, body: Vec<u8>) {
    match tauri::http::Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .header("Access-Control-Allow-Origin", "*")
        .body(body)
    {
        Ok(response) => responder.respond(response),
        Err(e) => log::error!("Failed to build asset response: {}", e),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let result = tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .register_asynchronous_uri_scheme_protocol("asset", |ctx, request, responder| {
            let Some(images) = ctx.app_handle().try_state::<AppState>().map(|s| s.images.clone()) else {
                respond(responder, 503, "text/plain", Vec::new());
                return;
            };
            let path = request.uri().path().to_string();
            std::thread::spawn(move || match images.serve(&path) {
                Some(asset) => respond(responder, 200, &asset.mime, asset.bytes),
                None => respond(responder, 404, "text/plain", Vec::new()),
            });
        })
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "Recycle")?;

            let config = AppConfig::load(&app_handle.path().app_config_dir()?);
            let app_dir = app_data_dir(&app_handle)?;
            let db_path = app_dir.join(&config.database_file);
            let images = ImageStore::open(app_dir.join(IMAGES_DIR))?;

            log::info!("App setup starting, database at {}", db_path.display());

            // Commands answer "Database not initialized" until the background init lands
            let db_state = DbState::new();
            app.manage(AppState::new(db_state.clone(), config, images));

            tauri::async_runtime::spawn(async move {
                match init_db(&db_path).await {
                    Ok(initialized_state) => {
                        let conn = initialized_state.conn.lock().await.take();
                        *db_state.conn.lock().await = conn;
                        let _ = rolling_logger::info("Async DB init success");

                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            log::error!("Failed to emit db-initialized: {}", e);
                        }
                    }
                    Err(e) => {
                        let _ = rolling_logger::error(&format!("Async DB init failed: {}", e));
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Catalog
            commands::list_categories,
            commands::list_items,
            commands::create_category,
            commands::update_category,
            commands::delete_category,
            commands::create_item,
            commands::update_item,
            commands::delete_item,
            // Scores
            commands::get_user_record,
            commands::create_user_record,
            commands::update_score,
            commands::top_scores,
            // Identity
            commands::sign_in,
            commands::sign_out,
            commands::current_user,
            // Settings and uploads
            commands::get_client_config,
            commands::save_image,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        log::error!("error while running tauri application: {}", e);
        std::process::exit(1);
    }
}
