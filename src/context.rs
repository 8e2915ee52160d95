//! Application Context
//!
//! Shared state provided via Leptos Context API. Owns the catalog cursor, the
//! search query and the score session, and runs the async work behind them.

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DragResult;
use recycle_core::{
    load_items, resolve_profile, CatalogSource, CatalogState, ClientConfig, Identity, LeaderboardSource,
    NoticeLevel, RecycleOutcome, ScoreSession, ScoreStore, Settled,
};

use crate::backend::TauriBackend;
use crate::store::{store_push_error, store_push_notice, AppStore, UiStateStoreFields};

/// Main panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Browse,
    Scoreboard,
    Admin,
}

/// Time since page load, the clock the score session runs on
fn clock_now() -> Duration {
    let ms = web_sys::window()
        .and_then(|win| win.performance())
        .map(|perf| perf.now())
        .unwrap_or_default();
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub catalog: RwSignal<CatalogState>,
    /// Sidebar search text
    pub query: RwSignal<String>,
    pub view: RwSignal<View>,
    session: StoredValue<ScoreSession>,
    /// A persist loop is running
    persisting: StoredValue<bool>,
    store: AppStore,
}

impl AppContext {
    pub fn new(store: AppStore) -> Self {
        let debounce = Duration::from_millis(ClientConfig::default().score_debounce_ms);
        Self {
            catalog: RwSignal::new(CatalogState::new()),
            query: RwSignal::new(String::new()),
            view: RwSignal::new(View::Browse),
            session: StoredValue::new(ScoreSession::new(debounce)),
            persisting: StoredValue::new(false),
            store,
        }
    }

    /// Apply backend settings; call before the first sign-in is processed
    pub fn configure(&self, config: ClientConfig) {
        let debounce = Duration::from_millis(config.score_debounce_ms);
        self.session.set_value(ScoreSession::new(debounce));
        self.store.client().set(config);
    }

    // ========================
    // Catalog
    // ========================

    pub fn load_categories(&self) {
        let catalog = self.catalog;
        let store = self.store;
        spawn_local(async move {
            let result = TauriBackend.list_categories().await;
            match catalog.try_update(|c| c.settle_categories(result)) {
                Some(Ok(count)) => {
                    web_sys::console::log_1(&format!("[CATALOG] Loaded {} categories", count).into());
                }
                Some(Err(err)) => store_push_error(&store, &err),
                None => {}
            }
        });
    }

    /// Open a category (`None` goes back to the category list).
    /// Clears the search text and any open item.
    pub fn select_category(&self, id: Option<String>) {
        self.query.set(String::new());
        let Some(request) = self.catalog.try_update(|c| c.select_category(id)).flatten() else {
            return;
        };

        let catalog = self.catalog;
        let store = self.store;
        spawn_local(async move {
            let (request, result) = load_items(&TauriBackend, request).await;
            match catalog.try_update(|c| c.settle_items(&request, result)) {
                Some(Settled::Applied(count)) => {
                    web_sys::console::log_1(
                        &format!("[CATALOG] Loaded {} items for {}", count, request.category_id).into(),
                    );
                }
                Some(Settled::Stale) => {
                    web_sys::console::log_1(
                        &format!("[CATALOG] Dropped stale items for {}", request.category_id).into(),
                    );
                }
                Some(Settled::Failed(err)) => store_push_error(&store, &err),
                None => {}
            }
        });
    }

    /// Refetch the open category's items
    pub fn reload_items(&self) {
        let current = self.catalog.with_untracked(|c| c.selected_category_id().map(str::to_string));
        if current.is_some() {
            self.select_category(current);
        }
    }

    pub fn select_item(&self, id: Option<String>) {
        let accepted = self.catalog.try_update(|c| c.select_item(id.clone())).unwrap_or(false);
        if !accepted {
            web_sys::console::warn_1(&format!("[CATALOG] Item {:?} is not in the open category", id).into());
        }
    }

    // ========================
    // Score
    // ========================

    /// Score a finished drag
    pub fn recycle(&self, result: DragResult) {
        web_sys::console::log_1(&format!("[DND] Dropped on {:?}", result.target).into());
        let outcome = self
            .session
            .try_update_value(|s| s.on_drop(result.target.as_deref(), clock_now()));

        match outcome {
            Some(RecycleOutcome::Recycled(score)) => {
                web_sys::console::log_1(&format!("[SCORE] Recycled, score {}", score).into());
                self.store.score().set(score);
                self.drive_persist();
            }
            Some(RecycleOutcome::SignInRequired) => {
                store_push_notice(&self.store, NoticeLevel::Info, "Sign in to keep score");
            }
            Some(RecycleOutcome::Missed) | None => {}
        }
    }

    /// Write the score once it has settled; one loop at a time
    fn drive_persist(&self) {
        if self.persisting.get_value() {
            return;
        }
        self.persisting.set_value(true);

        let ctx = *self;
        spawn_local(async move {
            loop {
                let Some(deadline) = ctx.session.try_with_value(|s| s.next_deadline()).flatten() else {
                    break;
                };
                let now = clock_now();
                if deadline > now {
                    let wait = (deadline - now).as_millis().min(u32::MAX as u128) as u32;
                    TimeoutFuture::new(wait + 1).await;
                    continue;
                }

                let Some(write) = ctx.session.try_update_value(|s| s.poll_persist(now)).flatten() else {
                    continue;
                };
                match TauriBackend.write_score(&write.uid, write.score).await {
                    Ok(()) => {
                        web_sys::console::log_1(&format!("[SCORE] Saved {}", write.score).into());
                        ctx.session.update_value(|s| s.confirm_persisted(&write));
                        ctx.refresh_leaderboard();
                    }
                    Err(err) => {
                        ctx.session.update_value(|s| s.persist_failed(&write));
                        store_push_error(&ctx.store, &err);
                    }
                }
            }
            ctx.persisting.set_value(false);
        });
    }

    /// React to `auth-state-changed`
    pub fn on_auth_changed(&self, identity: Option<Identity>) {
        self.store.identity().set(identity.clone());

        let Some(identity) = identity else {
            self.session.update_value(|s| s.sign_out());
            self.store.score().set(0);
            if self.view.get_untracked() == View::Admin {
                self.view.set(View::Browse);
            }
            return;
        };

        if !identity.is_admin && self.view.get_untracked() == View::Admin {
            self.view.set(View::Browse);
        }

        let ctx = *self;
        spawn_local(async move {
            match resolve_profile(&TauriBackend, &identity).await {
                Ok(profile) => {
                    // Another sign-in/out may have happened meanwhile
                    let still_current = ctx
                        .store
                        .identity()
                        .get_untracked()
                        .is_some_and(|current| current.uid == profile.uid);
                    if !still_current {
                        return;
                    }
                    web_sys::console::log_1(&format!("[SCORE] Signed in with score {}", profile.score).into());
                    ctx.session.update_value(|s| s.sign_in(&profile));
                    ctx.store.score().set(profile.score);
                }
                Err(err) => store_push_error(&ctx.store, &err),
            }
        });
    }

    pub fn refresh_leaderboard(&self) {
        let store = self.store;
        spawn_local(async move {
            let limit = store.client().get_untracked().leaderboard_limit;
            match TauriBackend.top_scores(limit).await {
                Ok(entries) => {
                    store.leaderboard().set(entries);
                    store.leaderboard_loaded().set(true);
                }
                Err(err) => store_push_error(&store, &err),
            }
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
