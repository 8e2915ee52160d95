//! Navigation Bar Component
//!
//! View switcher, live score and the local sign-in form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use recycle_core::AppError;

use crate::commands;
use crate::context::{use_app_context, View};
use crate::store::{store_is_admin, store_push_error, use_app_store, UiStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (busy, set_busy) = signal(false);

    // The identity itself arrives through the auth listener
    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let display_name = name.get();
        if display_name.trim().is_empty() || busy.get() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match commands::sign_in(&display_name, None).await {
                Ok(_) => set_name.set(String::new()),
                Err(e) => store_push_error(&store, &AppError::Auth(e)),
            }
            set_busy.set(false);
        });
    };

    let sign_out = move |_| {
        spawn_local(async move {
            if let Err(e) = commands::sign_out().await {
                store_push_error(&store, &AppError::Auth(e));
            }
        });
    };

    let tab = move |view: View, label: &'static str| {
        view! {
            <button
                class=move || if ctx.view.get() == view { "nav-tab active" } else { "nav-tab" }
                on:click=move |_| {
                    if view == View::Scoreboard {
                        ctx.refresh_leaderboard();
                    }
                    ctx.view.set(view);
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-title">"Recycle"</span>
            <div class="nav-tabs">
                {tab(View::Browse, "Browse")}
                {tab(View::Scoreboard, "Scoreboard")}
                <Show when=move || store_is_admin(&store)>
                    {tab(View::Admin, "Admin")}
                </Show>
            </div>

            <Show
                when=move || store.identity().get().is_some()
                fallback=move || view! {
                    <form class="sign-in-form" on:submit=sign_in>
                        <input
                            type="text"
                            placeholder="Your name"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=move || busy.get()>"Sign in"</button>
                    </form>
                }
            >
                <div class="nav-user">
                    {move || store.identity().get().map(|identity| {
                        let avatar = (!identity.avatar.is_empty()).then(|| view! {
                            <img class="avatar" src=identity.avatar.clone() alt="" />
                        });
                        view! {
                            {avatar}
                            <span class="nav-user-name">{identity.display_name.clone()}</span>
                        }
                    })}
                    <span class="nav-score" title="Items recycled">{move || store.score().get()}</span>
                    <button class="sign-out-btn" on:click=sign_out>"Sign out"</button>
                </div>
            </Show>
        </nav>
    }
}
