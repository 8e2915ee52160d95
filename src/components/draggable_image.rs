//! Draggable Image Component
//!
//! The picture of the open item; drag it onto the recycle bin to score.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, make_on_touchstart, DndSignals};

#[component]
pub fn DraggableImage(#[prop(into)] src: String, #[prop(into)] alt: String) -> impl IntoView {
    let dnd = use_context::<DndSignals>().expect("DndSignals should be provided");

    let on_mousedown = make_on_mousedown(dnd);
    let on_touchstart = make_on_touchstart(dnd);

    // Follows the pointer; pointer-events off so hit-testing sees the zone below
    let style = move || {
        if dnd.dragging_read.get() {
            let (dx, dy) = dnd.offset_read.get();
            format!("transform: translate({}px, {}px); pointer-events: none; z-index: 10;", dx, dy)
        } else {
            String::new()
        }
    };

    view! {
        <img
            class=move || if dnd.dragging_read.get() { "item-image dragging" } else { "item-image" }
            src=src
            alt=alt
            draggable="false"
            style=style
            on:mousedown=on_mousedown
            on:touchstart=on_touchstart
        />
    }
}
