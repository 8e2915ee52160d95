//! Recycle Bin Component
//!
//! The drop zone that counts as recycling.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;
use recycle_core::RECYCLE_ZONE;

#[component]
pub fn RecycleBin() -> impl IntoView {
    let dnd = use_context::<DndSignals>().expect("DndSignals should be provided");

    let class = move || {
        let mut c = String::from("recycle-bin");
        if dnd.dragging_read.get() { c.push_str(" armed"); }
        if dnd.is_over(RECYCLE_ZONE) { c.push_str(" over"); }
        c
    };

    view! {
        <div class=class data-drop-zone=RECYCLE_ZONE>
            <span class="recycle-bin-icon">"♻"</span>
            <span class="recycle-bin-label">"Drop here to recycle"</span>
        </div>
    }
}
