//! Leptos DragDrop Utilities
//!
//! Drag-and-drop for Leptos using mouse and touch events.
//! Both input kinds feed one [`GestureDispatcher`]; drop targets are elements
//! carrying a `data-drop-zone="<id>"` attribute, resolved by hit-testing the
//! release point.

pub mod gesture;

pub use gesture::*;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Attribute marking an element as a drop zone
pub const DROP_ZONE_ATTR: &str = "data-drop-zone";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<bool>,
    dragging_write: WriteSignal<bool>,
    /// Translation of the dragged element from where it was picked up
    pub offset_read: ReadSignal<(i32, i32)>,
    offset_write: WriteSignal<(i32, i32)>,
    /// Drop zone currently under the pointer
    pub over_zone_read: ReadSignal<Option<String>>,
    over_zone_write: WriteSignal<Option<String>>,
    dispatcher: StoredValue<GestureDispatcher>,
    touch: StoredValue<TouchAdapter>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(false);
    let (offset_read, offset_write) = signal((0i32, 0i32));
    let (over_zone_read, over_zone_write) = signal(None::<String>);
    DndSignals {
        dragging_read,
        dragging_write,
        offset_read,
        offset_write,
        over_zone_read,
        over_zone_write,
        dispatcher: StoredValue::new(GestureDispatcher::new()),
        touch: StoredValue::new(TouchAdapter::default()),
    }
}

impl DndSignals {
    /// Whether `zone` is the zone under the dragged element (tracked)
    pub fn is_over(&self, zone: &str) -> bool {
        self.over_zone_read.get().as_deref() == Some(zone)
    }

    /// Push dispatcher state into the signals
    fn sync(&self) {
        let (dragging, offset) = self
            .dispatcher
            .try_with_value(|d| (d.is_dragging(), d.offset()))
            .unwrap_or_default();
        if self.dragging_read.get_untracked() != dragging {
            self.dragging_write.set(dragging);
        }
        self.offset_write.set(offset);
        if !dragging && self.over_zone_read.get_untracked().is_some() {
            self.over_zone_write.set(None);
        }
    }

    fn track_zone(&self, at: Point) {
        if !self.dragging_read.get_untracked() {
            return;
        }
        let zone = zone_at(at);
        if zone != self.over_zone_read.get_untracked() {
            self.over_zone_write.set(zone);
        }
    }
}

/// Drop zone id of the element under a viewport point
pub fn zone_at(at: Point) -> Option<String> {
    let doc = web_sys::window()?.document()?;
    let element = doc.element_from_point(at.x as f32, at.y as f32)?;
    let zone = element.closest(&format!("[{}]", DROP_ZONE_ATTR)).ok()??;
    zone.get_attribute(DROP_ZONE_ATTR)
}

fn mouse_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x(), ev.client_y())
}

fn touch_point(touch: &web_sys::Touch) -> Point {
    Point::new(touch.client_x(), touch.client_y())
}

fn changed_touches(ev: &web_sys::TouchEvent) -> Vec<web_sys::Touch> {
    let list = ev.changed_touches();
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Create mousedown handler for the draggable element
pub fn make_on_mousedown(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        // Suppress the browser's native image drag
        ev.prevent_default();
        let at = mouse_point(&ev);
        dnd.dispatcher
            .try_update_value(|d| MouseAdapter.down(d, ev.button(), at));
        dnd.sync();
    }
}

/// Create touchstart handler for the draggable element
pub fn make_on_touchstart(dnd: DndSignals) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        let count = ev.touches().length();
        for touch in changed_touches(&ev) {
            let at = touch_point(&touch);
            dnd.touch.try_update_value(|adapter| {
                dnd.dispatcher
                    .try_update_value(|d| adapter.start(d, touch.identifier(), count, at))
            });
        }
        dnd.sync();
    }
}

/// Bind document-level move/release handlers for both input kinds.
///
/// `on_drop` runs once per completed drag, whether or not it landed on a zone.
/// Call once for the lifetime of the app.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(DragResult) + Clone + 'static,
{
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let at = mouse_point(&ev);
        dnd.dispatcher.try_update_value(|d| MouseAdapter.moved(d, at));
        dnd.sync();
        dnd.track_zone(at);
    });

    let drop_mouse = on_drop.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let target = zone_at(mouse_point(&ev));
        let result = dnd
            .dispatcher
            .try_update_value(|d| MouseAdapter.up(d, target.as_deref()))
            .flatten();
        dnd.sync();
        if let Some(result) = result {
            drop_mouse(result);
        }
    });

    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        for touch in changed_touches(&ev) {
            let at = touch_point(&touch);
            dnd.touch.try_update_value(|adapter| {
                dnd.dispatcher
                    .try_update_value(|d| adapter.moved(d, touch.identifier(), at))
            });
            dnd.sync();
            dnd.track_zone(at);
        }
        // Keep the page from scrolling under an active drag
        if dnd.dragging_read.get_untracked() {
            ev.prevent_default();
        }
    });

    let drop_touch = on_drop;
    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        for touch in changed_touches(&ev) {
            let target = zone_at(touch_point(&touch));
            let result = dnd
                .touch
                .try_update_value(|adapter| {
                    dnd.dispatcher
                        .try_update_value(|d| adapter.end(d, touch.identifier(), target.as_deref()))
                        .flatten()
                })
                .flatten();
            dnd.sync();
            if let Some(result) = result {
                drop_touch(result);
            }
        }
    });

    let on_touchcancel = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        dnd.touch.try_update_value(|adapter| {
            dnd.dispatcher.try_update_value(|d| adapter.cancel(d))
        });
        dnd.sync();
    });

    // Releasing outside the window never reaches us as a mouseup
    let on_mouseleave = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        dnd.dispatcher.try_update_value(|d| d.cancel());
        dnd.sync();
    });

    let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());

    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = doc.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        on_touchmove.as_ref().unchecked_ref(),
        &options,
    );
    let _ = doc.add_event_listener_with_callback("touchend", on_touchend.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("touchcancel", on_touchcancel.as_ref().unchecked_ref());

    if let Some(root) = doc.document_element() {
        let _ = root.add_event_listener_with_callback("mouseleave", on_mouseleave.as_ref().unchecked_ref());
    }

    on_mousemove.forget();
    on_mouseleave.forget();
    on_mouseup.forget();
    on_touchmove.forget();
    on_touchend.forget();
    on_touchcancel.forget();
}
