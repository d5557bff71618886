//! Drop Zone Component
//!
//! A horizontal line between rows; dropping here inserts at that gap.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_slot_mousemove, DndSignals, DropTarget, Lane};

/// Gap `index` of `lane`, counted on the rows as displayed
#[component]
pub fn DropZone(dnd: DndSignals, lane: Lane, index: i32) -> impl IntoView {
    let is_active = move || dnd.drop_target_read.get() == Some(DropTarget::Slot(lane, index));
    let is_dragging = move || dnd.dragging_id_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !is_dragging() { c.push_str(" hidden"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    view! { <div class=zone_class on:mousemove=make_on_slot_mousemove(dnd, lane, index) /> }
}
