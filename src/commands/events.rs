//! Backend Event Listeners
//!
//! Bindings to the Tauri event API. Listeners registered here live for the
//! lifetime of the page.

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use recycle_core::Identity;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

pub const AUTH_STATE_CHANGED: &str = "auth-state-changed";
pub const DB_INITIALIZED: &str = "db-initialized";

fn payload<T: DeserializeOwned>(event: &JsValue) -> Result<T, String> {
    let payload = js_sys::Reflect::get(event, &JsValue::from_str("payload"))
        .map_err(|e| format!("{:?}", e))?;
    serde_wasm_bindgen::from_value(payload).map_err(|e| e.to_string())
}

async fn listen_forever(event: &str, handler: Closure<dyn FnMut(JsValue)>) -> Result<(), String> {
    listen(event, &handler).await.map_err(|e| format!("{:?}", e))?;
    handler.forget();
    Ok(())
}

/// Subscribe to sign-in/out. `None` means signed out.
pub async fn listen_auth_state<F>(mut on_change: F) -> Result<(), String>
where
    F: FnMut(Option<Identity>) + 'static,
{
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match payload::<Option<Identity>>(&event) {
            Ok(identity) => on_change(identity),
            Err(e) => web_sys::console::error_1(&format!("[AUTH] Bad auth payload: {}", e).into()),
        }
    });
    listen_forever(AUTH_STATE_CHANGED, handler).await
}

/// Fires once the backend database is open
pub async fn listen_db_initialized<F>(mut on_ready: F) -> Result<(), String>
where
    F: FnMut() + 'static,
{
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| on_ready());
    listen_forever(DB_INITIALIZED, handler).await
}
