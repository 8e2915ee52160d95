//! Recycle Frontend Entry Point

mod backend;
mod commands;
mod context;
mod store;
mod upload;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
