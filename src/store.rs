//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use recycle_core::notice::NOTICE_TTL_MS;
use recycle_core::{AppError, ClientConfig, Identity, Notice, NoticeLevel, ScoreEntry};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Transient messages, oldest first
    pub notices: Vec<Notice>,
    pub next_notice_id: u32,
    /// Signed-in identity (None = anonymous)
    pub identity: Option<Identity>,
    /// Score shown in the nav bar; ahead of the stored value while a write is pending
    pub score: u64,
    pub leaderboard: Vec<ScoreEntry>,
    /// False until the first leaderboard fetch answered
    pub leaderboard_loaded: bool,
    pub client: ClientConfig,
}

/// Type alias for the store
pub type AppStore = Store<UiState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a notice and dismiss it after [`NOTICE_TTL_MS`]
pub fn store_push_notice(store: &AppStore, level: NoticeLevel, message: impl Into<String>) {
    let id = {
        let field = store.next_notice_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    store.notices().write().push(Notice::new(id, level, message));

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TTL_MS).await;
        store_dismiss_notice(&store, id);
    });
}

pub fn store_push_error(store: &AppStore, err: &AppError) {
    web_sys::console::error_1(&format!("[APP] {}", err).into());
    store_push_notice(store, NoticeLevel::Error, err.to_string());
}

pub fn store_dismiss_notice(store: &AppStore, id: u32) {
    store.notices().write().retain(|notice| notice.id != id);
}

pub fn store_is_admin(store: &AppStore) -> bool {
    store.identity().get().is_some_and(|identity| identity.is_admin)
}
