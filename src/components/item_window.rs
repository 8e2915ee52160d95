//! Item Window Component
//!
//! Details of the open item: decomposition time, environmental damage and
//! recycling benefits, plus the image to drag into the bin.

use leptos::prelude::*;
use recycle_core::Item;

use crate::components::{DraggableImage, RecycleBin};
use crate::context::use_app_context;

fn detail_list(title: &'static str, class: &'static str, lines: Option<Vec<String>>) -> impl IntoView {
    lines.map(|lines| {
        view! {
            <section class=class>
                <h3>{title}</h3>
                <ul>
                    {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </section>
        }
    })
}

fn item_details(item: Item, bin: Option<String>) -> impl IntoView {
    view! {
        <article class="item-window">
            <header class="item-header">
                <h2>{item.name.clone()}</h2>
            </header>
            <div class="item-body">
                <DraggableImage src=item.image.clone() alt=item.name.clone() />
                <div class="item-facts">
                    <p class="decompose-time">
                        <span class="label">"Decomposes in "</span>
                        <strong>{item.decompose_time.clone()}</strong>
                    </p>
                    {bin.map(|bin| view! {
                        <p class="bin-hint">
                            "Throw it into the "<strong>{bin}</strong>" bin."
                        </p>
                    })}
                    {detail_list("If thrown away", "item-results", item.results)}
                    {detail_list("If recycled", "item-benefits", item.benefits)}
                </div>
            </div>
        </article>
    }
}

#[component]
pub fn ItemWindow() -> impl IntoView {
    let ctx = use_app_context();

    let content = move || {
        let (item, bin, category_open) = ctx.catalog.with(|c| {
            (
                c.selected_item().cloned(),
                c.selected_item_bin().map(str::to_string),
                c.selected_category_id().is_some(),
            )
        });
        match item {
            Some(item) => item_details(item, bin).into_any(),
            None if category_open => view! {
                <div class="item-window empty">
                    <p>"Pick an item to see how long it lasts and why recycling it matters."</p>
                </div>
            }
            .into_any(),
            None => view! {
                <div class="item-window empty">
                    <h2>"Learn to recycle"</h2>
                    <p>"Choose a category, open an item and drag its picture into the bin."</p>
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <main class="item-pane">
            {content}
            <RecycleBin />
        </main>
    }
}
