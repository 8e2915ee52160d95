//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod catalog_cmd;
mod score_cmd;
mod auth_cmd;
mod asset_cmd;

pub use catalog_cmd::*;
pub use score_cmd::*;
pub use auth_cmd::*;
pub use asset_cmd::*;
