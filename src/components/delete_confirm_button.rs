//! Delete Confirm Button Component
//!
//! Inline two-step delete for admin rows.

use leptos::prelude::*;

/// Shows a × button; clicking it asks "Delete <what>?" with ✓/✗.
///
/// # Arguments
/// * `what` - Name of the record, shown in the question
/// * `on_confirm` - Runs once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] what: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let title = format!("Delete {}", what);
    let question = format!("Delete {}?", what);

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    title=title.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">{question.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
