//! Notice Stack Component
//!
//! Renders transient notices; each one dismisses itself after a few seconds
//! or on click.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, UiStateStoreFields};

#[component]
pub fn NoticeStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notice-stack" aria-live="polite">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.css_class() on:click=move |_| store_dismiss_notice(&store, id)>
                            {notice.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
