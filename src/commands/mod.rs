//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod catalog;
mod score;
mod auth;
mod events;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use catalog::*;
pub use score::*;
pub use auth::*;
pub use events::*;

/// Rejections carry the backend's error string
fn error_text(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, String> {
    let result = invoke(cmd, args).await.map_err(error_text)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Response error: {}", e))
}

async fn call_with<A: Serialize, T: DeserializeOwned>(cmd: &str, args: &A) -> Result<T, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| format!("Serialization error: {}", e))?;
    call(cmd, js_args).await
}

/// For commands answering `()`; the resolved value is `null`
async fn call_unit<A: Serialize>(cmd: &str, args: &A) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| format!("Serialization error: {}", e))?;
    invoke(cmd, js_args).await.map(|_| ()).map_err(error_text)
}
