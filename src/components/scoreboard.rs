//! Scoreboard Component
//!
//! Top recyclers, highest score first. Admins wear a crown.

use leptos::prelude::*;

use crate::store::{use_app_store, UiStateStoreFields};

pub const EMPTY_SCOREBOARD: &str = "No one has found out about the game yet!";

#[component]
pub fn Scoreboard() -> impl IntoView {
    let store = use_app_store();

    let rows = move || {
        let entries = store.leaderboard().get();
        if entries.is_empty() {
            let text = if store.leaderboard_loaded().get() { EMPTY_SCOREBOARD } else { "Loading..." };
            return view! { <p class="scoreboard-empty">{text}</p> }.into_any();
        }

        let me = store.identity().get().map(|identity| identity.uid);
        view! {
            <ol class="scoreboard-list">
                {entries
                    .into_iter()
                    .map(|entry| {
                        let class = if me.as_deref() == Some(entry.uid.as_str()) {
                            "scoreboard-row me"
                        } else {
                            "scoreboard-row"
                        };
                        let avatar = (!entry.avatar.is_empty()).then(|| view! {
                            <img class="avatar" src=entry.avatar.clone() alt="" />
                        });
                        view! {
                            <li class=class>
                                {avatar}
                                <span class="scoreboard-name">
                                    {entry.display_name.clone()}
                                    {entry.is_admin.then(|| view! { <span class="crown" title="Admin">"👑"</span> })}
                                </span>
                                <span class="scoreboard-score">{entry.score}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        }
        .into_any()
    };

    view! {
        <section class="scoreboard">
            <h2>"Scoreboard"</h2>
            {rows}
        </section>
    }
}
