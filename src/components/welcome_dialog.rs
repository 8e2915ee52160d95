//! Welcome Dialog Component
//!
//! One-time introduction shown over the app once the categories are in.
//! Closing it is remembered in `localStorage`.

use leptos::prelude::*;

use crate::context::use_app_context;

const DISMISSED_KEY: &str = "welcome-dismissed";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn is_dismissed(stored: Option<&str>) -> bool {
    stored.is_some_and(|value| !value.is_empty())
}

#[component]
pub fn WelcomeDialog() -> impl IntoView {
    let ctx = use_app_context();

    let stored = local_storage().and_then(|storage| storage.get_item(DISMISSED_KEY).ok().flatten());
    let (open, set_open) = signal(!is_dismissed(stored.as_deref()));

    let ready = move || ctx.catalog.with(|c| !c.categories().is_empty());

    let close = move |_| {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.set_item(DISMISSED_KEY, "true") {
                web_sys::console::warn_1(&format!("[APP] Could not remember welcome dismissal: {:?}", err).into());
            }
        }
        set_open.set(false);
    };

    view! {
        <Show when=move || open.get() && ready()>
            <div class="welcome-backdrop">
                <div class="welcome-dialog" role="dialog" aria-labelledby="welcome-title">
                    <header>
                        <h2 id="welcome-title">"Welcome"</h2>
                    </header>
                    <div class="welcome-body">
                        <p>
                            "Everyday items outlive us by years. Browse a category, open an item to see "
                            "how long it takes to decompose and what recycling it saves."
                        </p>
                        <p>"Drag an item's picture into the bin to recycle it. Sign in to keep your score."</p>
                    </div>
                    <footer>
                        <button class="welcome-close" title="Close window" on:click=close>"Close"</button>
                    </footer>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismissal_flag() {
        assert!(!is_dismissed(None));
        assert!(!is_dismissed(Some("")));
        assert!(is_dismissed(Some("true")));
    }
}
