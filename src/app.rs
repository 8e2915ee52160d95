//! Recycle Frontend App
//!
//! Main application component: nav bar, browse sidebar and item window, with
//! the scoreboard and admin panel as alternate main views.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_handlers, create_dnd_signals};
use recycle_core::{initial_query, search::QUERY_PARAMS};
use reactive_stores::Store;

use crate::commands;
use crate::components::{AdminPanel, BrowseSidebar, ItemWindow, NavBar, NoticeStack, Scoreboard, WelcomeDialog};
use crate::context::{AppContext, View};
use crate::store::{store_is_admin, UiState};

/// Search text passed in the page URL (`?q=plastic`)
fn query_from_location() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let pairs: Vec<(&str, String)> = QUERY_PARAMS
        .iter()
        .filter_map(|key| params.get(key).map(|value| (*key, value)))
        .collect();
    initial_query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(UiState::default());
    provide_context(store);

    let ctx = AppContext::new(store);
    provide_context(ctx);

    // One gesture pipeline for the whole page; every finished drag is scored
    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_handlers(dnd, move |result| ctx.recycle(result));

    if let Some(query) = query_from_location() {
        ctx.query.set(query);
    }

    // Startup: settings first so the score session uses the configured debounce,
    // then the single auth listener, then whoever is already signed in.
    spawn_local(async move {
        match commands::get_client_config().await {
            Ok(config) => ctx.configure(config),
            Err(e) => web_sys::console::warn_1(&format!("[APP] Using default settings: {}", e).into()),
        }

        if let Err(e) = commands::listen_auth_state(move |identity| ctx.on_auth_changed(identity)).await {
            web_sys::console::error_1(&format!("[APP] Auth listener failed: {}", e).into());
        }
        if let Err(e) = commands::listen_db_initialized(move || {
            ctx.load_categories();
            ctx.refresh_leaderboard();
        })
        .await
        {
            web_sys::console::error_1(&format!("[APP] DB listener failed: {}", e).into());
        }

        match commands::current_user().await {
            Ok(Some(identity)) => ctx.on_auth_changed(Some(identity)),
            Ok(None) => {}
            Err(e) => web_sys::console::warn_1(&format!("[APP] current_user failed: {}", e).into()),
        }

        ctx.load_categories();
        ctx.refresh_leaderboard();
    });

    let main_view = move || match ctx.view.get() {
        View::Browse => view! {
            <div class="browse-layout">
                <BrowseSidebar />
                <ItemWindow />
            </div>
        }
        .into_any(),
        View::Scoreboard => view! { <Scoreboard /> }.into_any(),
        View::Admin if store_is_admin(&store) => view! { <AdminPanel /> }.into_any(),
        View::Admin => view! { <p class="admin-denied">"Only admins can edit the catalog."</p> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <NavBar />
            {main_view}
            <NoticeStack />
            <WelcomeDialog />
        </div>
    }
}
