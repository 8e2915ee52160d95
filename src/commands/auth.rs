//! Identity Commands
//!
//! Local sign-in and the client settings handed out at startup.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use recycle_core::{ClientConfig, Identity};
use super::{call, call_unit, call_with};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInArgs<'a> {
    display_name: &'a str,
    avatar: Option<&'a str>,
}

/// Sign in; the new identity also arrives through the auth listener
pub async fn sign_in(display_name: &str, avatar: Option<&str>) -> Result<Identity, String> {
    call_with("sign_in", &SignInArgs { display_name, avatar }).await
}

pub async fn sign_out() -> Result<(), String> {
    call_unit("sign_out", &()).await
}

pub async fn current_user() -> Result<Option<Identity>, String> {
    call("current_user", JsValue::NULL).await
}

pub async fn get_client_config() -> Result<ClientConfig, String> {
    call("get_client_config", JsValue::NULL).await
}
