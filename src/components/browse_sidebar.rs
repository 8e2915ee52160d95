//! Browse Sidebar Component
//!
//! Search box over the category list, or over the open category's items.

use leptos::prelude::*;
use recycle_core::{filter, Listing, ListingKind};

use crate::context::use_app_context;

#[component]
pub fn BrowseSidebar() -> impl IntoView {
    let ctx = use_app_context();

    let open_category = move || {
        ctx.catalog.with(|c| {
            c.selected_category_id()
                .map(|id| c.category_name(id).unwrap_or("Items").to_string())
        })
    };

    let placeholder = move || {
        if open_category().is_some() { "Search items..." } else { "Search categories..." }
    };

    let listing = move || {
        let query = ctx.query.get();
        ctx.catalog.with(|catalog| {
            let selected_item = catalog.selected_item_id().map(str::to_string);
            match filter(catalog, &query) {
                Listing::Categories(categories) => categories
                    .into_iter()
                    .map(|category| {
                        let id = category.id.clone();
                        view! {
                            <li class="sidebar-entry" on:click=move |_| ctx.select_category(Some(id.clone()))>
                                <img class="sidebar-thumb" src=category.image.clone() alt="" draggable="false" />
                                <span>{category.name.clone()}</span>
                            </li>
                        }
                    })
                    .collect_view()
                    .into_any(),
                Listing::Items(items) => items
                    .into_iter()
                    .map(|item| {
                        let id = item.id.clone();
                        let class = if selected_item.as_deref() == Some(item.id.as_str()) {
                            "sidebar-entry selected"
                        } else {
                            "sidebar-entry"
                        };
                        view! {
                            <li class=class on:click=move |_| ctx.select_item(Some(id.clone()))>
                                <img class="sidebar-thumb" src=item.image.clone() alt="" draggable="false" />
                                <span>{item.name.clone()}</span>
                            </li>
                        }
                    })
                    .collect_view()
                    .into_any(),
                Listing::NoResults(kind) => {
                    let text = match kind {
                        ListingKind::Categories => "No categories match your search",
                        ListingKind::Items => "No items match your search",
                    };
                    view! { <li class="sidebar-empty">{text}</li> }.into_any()
                }
                Listing::Loading => view! { <li class="sidebar-empty">"Loading..."</li> }.into_any(),
                Listing::Failed => view! {
                    <li class="sidebar-empty">
                        <span>"Could not load items"</span>
                        <button class="retry-btn" on:click=move |_| ctx.reload_items()>"Retry"</button>
                    </li>
                }
                .into_any(),
            }
        })
    };

    view! {
        <aside class="browse-sidebar">
            <Show when=move || open_category().is_some()>
                <button class="back-btn" on:click=move |_| ctx.select_category(None)>
                    {move || format!("← {}", open_category().unwrap_or_default())}
                </button>
            </Show>
            <input
                class="search-input"
                type="search"
                placeholder=placeholder
                prop:value=move || ctx.query.get()
                on:input=move |ev| ctx.query.set(event_target_value(&ev))
            />
            <ul class="sidebar-list">{listing}</ul>
        </aside>
    }
}
