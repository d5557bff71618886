//! List View Component
//!
//! The same board as stacked sections: unplaced ideas first, then one
//! section per column. Drop zones between rows give exact slots.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_lane_mousemove, make_on_mouseleave, Lane};

use crate::components::{CardView, DropZone};
use crate::context::use_app_context;
use crate::store::{lane_cards, use_app_store, AppStateStoreFields};

#[component]
pub fn ListView() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="list-view">
            <ListSection lane=None title="Ideas" />
            <For
                each=move || store.columns().get()
                key=|column| (column.id, column.title.clone())
                children=move |column| view! { <ListSection lane=Some(column.id) title=column.title /> }
            />
        </div>
    }
}

#[component]
fn ListSection(lane: Lane, #[prop(into)] title: String) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;

    let rows = move || {
        store
            .board()
            .with(|board| lane_cards(board, lane))
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>()
    };

    view! {
        <section
            class="list-section"
            on:mousemove=make_on_lane_mousemove(dnd, lane)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <h2 class="list-section-title">{title}</h2>
            <DropZone dnd=dnd lane=lane index=0 />
            <For
                each=rows
                key=|(index, card)| (*index, card.id, card.title.clone(), card.assignee.clone())
                children=move |(index, card)| {
                    view! {
                        <CardView card=card compact=true />
                        <DropZone dnd=dnd lane=lane index={index as i32 + 1} />
                    }
                }
            />
        </section>
    }
}
