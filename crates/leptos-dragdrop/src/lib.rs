//! Leptos DragDrop Utilities
//!
//! Pointer plumbing for board drag-and-drop using mouse events.
//! A movement threshold tells a click from a drag; every target the
//! pointer crosses is reported as a `board_order::DropTarget`.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::JsCast;

pub use board_order::{DropTarget, Edge, ItemId, Lane};

/// Receives drag lifecycle events from the global pointer handlers
pub trait DragListener {
    /// Pointer moved past the threshold on `item_id`. Return false to refuse the drag.
    fn start(&self, item_id: ItemId) -> bool;
    /// Pointer is over a new target
    fn hover(&self, target: DropTarget);
    /// Pointer released; `None` when outside every target
    fn release(&self, target: Option<DropTarget>);
    /// Escape pressed during a drag
    fn cancel(&self);
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<ItemId>>,
    pub dragging_id_write: WriteSignal<Option<ItemId>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    /// True for a short moment after a drag so the trailing click is ignored
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<ItemId>>,
    pub pending_id_write: WriteSignal<Option<ItemId>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Receiver of target changes, set by `bind_global_handlers`
    listener: StoredValue<Option<Rc<dyn DragListener>>, LocalStorage>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long clicks are suppressed after a drag ends
const CLICK_SUPPRESS_MS: i32 = 100;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<ItemId>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<ItemId>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        listener: StoredValue::new_local(None),
    }
}

fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Upper half of a card means before it, lower half after it
fn edge_at(pointer_y: f64, top: f64, height: f64) -> Edge {
    if pointer_y < top + height / 2.0 {
        Edge::Before
    } else {
        Edge::After
    }
}

fn event_edge(ev: &web_sys::MouseEvent) -> Edge {
    ev.current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            edge_at(ev.client_y() as f64, rect.top(), rect.height())
        })
        .unwrap_or_default()
}

/// Record a new target and hand it to the listener in the same event
fn set_target(dnd: &DndSignals, target: Option<DropTarget>) {
    if dnd.drop_target_read.get_untracked() == target {
        return;
    }
    dnd.drop_target_write.set(target);
    let Some(target) = target else {
        return;
    };
    if dnd.dragging_id_read.get_untracked().is_some() {
        let listener = dnd.listener.with_value(|l| l.clone());
        if let Some(listener) = listener {
            listener.hover(target);
        }
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable items.
/// Records a pending drag with its start position.
pub fn make_on_mousedown(dnd: DndSignals, item_id: ItemId) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_id_write.set(Some(item_id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mousemove handler for a card: before or after it by pointer height
pub fn make_on_item_mousemove(dnd: DndSignals, item_id: ItemId) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_none() {
            return;
        }
        // Keep the column background handler from overriding the card
        ev.stop_propagation();
        set_target(&dnd, Some(DropTarget::Item(item_id, event_edge(&ev))));
    }
}

/// Create mousemove handler for a column background
pub fn make_on_lane_mousemove(dnd: DndSignals, lane: Lane) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            set_target(&dnd, Some(DropTarget::Column(lane)));
        }
    }
}

/// Create mousemove handler for a drop zone between two items
pub fn make_on_slot_mousemove(dnd: DndSignals, lane: Lane, index: i32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            ev.stop_propagation();
            set_target(&dnd, Some(DropTarget::Slot(lane, index)));
        }
    }
}

/// Create mouseleave handler for a whole lane: the pointer left every target in it
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            set_target(&dnd, None);
        }
    }
}

fn add_document_listener<T: WasmClosure + ?Sized>(event: &str, cb: Closure<T>) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    }
    cb.forget();
}

/// Bind document-level pointer and keyboard handlers.
///
/// Starts drags past the threshold, reports releases, and cancels on
/// Escape. Target changes reach `listener` from the item and lane handlers.
pub fn bind_global_handlers(dnd: DndSignals, listener: Rc<dyn DragListener>) {
    dnd.listener.set_value(Some(listener.clone()));

    let on_move = listener.clone();
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id_read.get_untracked() else {
            return;
        };
        if dnd.dragging_id_read.get_untracked().is_some() {
            return;
        }
        if exceeds_threshold(dnd.start_read.get_untracked(), (ev.client_x(), ev.client_y())) {
            if on_move.start(pending) {
                dnd.dragging_id_write.set(Some(pending));
            } else {
                dnd.pending_id_write.set(None);
            }
        }
    });
    add_document_listener("mousemove", on_mousemove);

    let on_up = listener.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_id_read.get_untracked();
        let target = dnd.drop_target_read.get_untracked();
        dnd.pending_id_write.set(None);
        if dragging.is_some() {
            end_drag(&dnd);
            on_up.release(target);
        }
        // Otherwise it was a click; the element's click handler runs as usual
    });
    add_document_listener("mouseup", on_mouseup);

    let on_key = listener;
    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dnd.dragging_id_read.get_untracked().is_some() {
            end_drag(&dnd);
            on_key.cancel();
        }
    });
    add_document_listener("keydown", on_keydown);

}
