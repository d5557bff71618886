//! Kanban Board Component
//!
//! One lane per column, plus the unplaced ideas lane on the left.
//! Cards are drop targets by half (before/after); the lane background
//! appends.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_lane_mousemove, make_on_mouseleave, DropTarget, Lane};

use crate::commands;
use crate::components::{CardView, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::store::{
    lane_cards, store_add_column, store_flash_notice, store_rename_column, use_app_store, AppStateStoreFields,
};

const ERROR_NOTICE_MS: u32 = 5000;

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="kanban-board">
            <BoardLane lane=None title="Ideas" />
            <For
                each=move || store.columns().get()
                key=|column| (column.id, column.title.clone())
                children=move |column| view! { <BoardLane lane=Some(column.id) title=column.title /> }
            />
            <NewColumnForm />
        </div>
    }
}

#[component]
fn BoardLane(lane: Lane, #[prop(into)] title: String) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;

    let cards = move || store.board().with(|board| lane_cards(board, lane));
    let is_target = move || dnd.drop_target_read.get() == Some(DropTarget::Column(lane));
    let lane_class = move || {
        let mut c = String::from("lane");
        if lane.is_none() { c.push_str(" ideas"); }
        if is_target() { c.push_str(" drop-target"); }
        c
    };

    view! {
        <section
            class=lane_class
            on:mousemove=make_on_lane_mousemove(dnd, lane)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <LaneHeader lane=lane title=title count=Signal::derive(move || cards().len()) />
            <div class="lane-cards">
                <For
                    each=cards
                    key=|card| (card.id, card.title.clone(), card.assignee.clone())
                    children=move |card| view! { <CardView card=card /> }
                />
            </div>
        </section>
    }
}

/// Title (click to rename), card count, and the lane actions
#[component]
fn LaneHeader(lane: Lane, title: String, count: Signal<usize>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(title.clone());

    let original = title.clone();
    let save = move || {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let new_title = draft.get_untracked().trim().to_string();
        let Some(column_id) = lane else { return };
        if new_title.is_empty() || new_title == original {
            set_draft.set(original.clone());
            return;
        }
        spawn_local(async move {
            match commands::rename_column(column_id, &new_title).await {
                Ok(column) => store_rename_column(&store, column),
                Err(e) => store_flash_notice(&store, e, ERROR_NOTICE_MS),
            }
        });
    };
    let save_on_key = save.clone();
    let revert_to = title.clone();

    // Rewrites stored positions to 1..N, then reloads what was stored
    let repair = move |_: web_sys::MouseEvent| {
        spawn_local(async move {
            match commands::reindex_column(lane).await {
                Ok(changed) => {
                    web_sys::console::log_1(&format!("[APP] repaired {:?}: {} rows", lane, changed).into());
                    ctx.reload();
                }
                Err(e) => store_flash_notice(&store, e, ERROR_NOTICE_MS),
            }
        });
    };

    let delete = Callback::new(move |_| {
        let Some(column_id) = lane else { return };
        spawn_local(async move {
            match commands::delete_column(column_id).await {
                Ok(()) => ctx.reload(),
                Err(e) => store_flash_notice(&store, e, ERROR_NOTICE_MS),
            }
        });
    });

    view! {
        <header class="lane-header">
            <Show
                when=move || editing.get()
                fallback={
                    let title = title.clone();
                    move || {
                        view! {
                            <span
                                class="lane-title"
                                on:click=move |_| {
                                    if lane.is_some() {
                                        set_editing.set(true);
                                    }
                                }
                            >
                                {title.clone()}
                            </span>
                        }
                    }
                }
            >
                <input
                    class="lane-title-input"
                    type="text"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown={
                        let save = save_on_key.clone();
                        let revert_to = revert_to.clone();
                        move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                            "Enter" => save(),
                            "Escape" => {
                                set_editing.set(false);
                                set_draft.set(revert_to.clone());
                            }
                            _ => {}
                        }
                    }
                    on:blur={
                        let save = save.clone();
                        move |_| save()
                    }
                />
            </Show>
            <span class="lane-count">{move || count.get()}</span>
            <button class="repair-btn" title="Repair order" on:click=repair>"⟳"</button>
            {lane.map(|_| view! { <DeleteConfirmButton button_class="delete-btn" on_confirm=delete /> })}
        </header>
    }
}

#[component]
fn NewColumnForm() -> impl IntoView {
    let store = use_app_store();
    let (title, set_title) = signal(String::new());

    let create_column = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get().trim().to_string();
        if text.is_empty() { return; }
        spawn_local(async move {
            match commands::create_column(&text).await {
                Ok(column) => {
                    set_title.set(String::new());
                    store_add_column(&store, column);
                }
                Err(e) => store_flash_notice(&store, e, ERROR_NOTICE_MS),
            }
        });
    };

    view! {
        <form class="new-column-form" on:submit=create_column>
            <input
                type="text"
                placeholder="New column..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <button type="submit">"+"</button>
        </form>
    }
}
