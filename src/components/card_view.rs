//! Card Component
//!
//! One draggable card. Click to rename, × to delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_item_mousemove, make_on_mousedown, DropTarget, Edge};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::Card;
use crate::store::{store_flash_notice, store_remove_card, store_update_card, use_app_store};

const ERROR_NOTICE_MS: u32 = 5000;

#[component]
pub fn CardView(
    card: Card,
    /// Render as a single list row instead of a kanban card
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;
    let id = card.id;
    let title = card.title.clone();

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(card.title.clone());

    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let drop_edge = move || match dnd.drop_target_read.get() {
        Some(DropTarget::Item(target, edge)) if target == id => Some(edge),
        _ => None,
    };
    let card_class = move || {
        let mut c = String::from(if compact { "list-row" } else { "card" });
        if is_dragging() { c.push_str(" dragging"); }
        match drop_edge() {
            Some(Edge::Before) => c.push_str(" drop-before"),
            Some(Edge::After) => c.push_str(" drop-after"),
            None => {}
        }
        c
    };

    let original = card.title.clone();
    let save = move || {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let new_title = draft.get_untracked().trim().to_string();
        if new_title.is_empty() || new_title == original {
            set_draft.set(original.clone());
            return;
        }
        spawn_local(async move {
            match commands::update_item(id, Some(&new_title), None).await {
                Ok(updated) => store_update_card(&store, updated),
                Err(e) => store_flash_notice(&store, e, ERROR_NOTICE_MS),
            }
        });
    };
    let save_on_key = save.clone();
    let revert_to = card.title.clone();

    let delete = Callback::new(move |_| {
        spawn_local(async move {
            match commands::delete_item(id).await {
                Ok(()) => store_remove_card(&store, id),
                Err(e) => store_flash_notice(&store, e, ERROR_NOTICE_MS),
            }
        });
    });

    view! {
        <div
            class=card_class
            on:mousedown=make_on_mousedown(dnd, id)
            on:mousemove=make_on_item_mousemove(dnd, id)
            on:click=move |_| {
                // The click that ends a drag is not a rename
                if !dnd.drag_just_ended_read.get_untracked() {
                    set_editing.set(true);
                }
            }
        >
            <Show
                when=move || editing.get()
                fallback={
                    let title = title.clone();
                    let assignee = card.assignee.clone();
                    move || {
                        view! {
                            <span class="card-title">{title.clone()}</span>
                            {assignee.clone().map(|a| view! { <span class="card-assignee">{a}</span> })}
                        }
                    }
                }
            >
                <input
                    class="card-title-input"
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
            <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
        </div>
    }
}
