//! New Card Form Component
//!
//! Creates a card at the end of the chosen column (or as an idea).

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, CreateItemArgs};
use crate::store::{store_add_card, store_flash_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NewCardForm() -> impl IntoView {
    let store = use_app_store();

    let (new_title, set_new_title) = signal(String::new());
    let (assignee, set_assignee) = signal(String::new());
    // None = ideas lane
    let (column, set_column) = signal(None::<u32>);

    let create_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get().trim().to_string();
        if title.is_empty() { return; }
        let who = assignee.get().trim().to_string();
        let column_id = column.get();

        spawn_local(async move {
            let args = CreateItemArgs {
                title: &title,
                column_id,
                assignee: if who.is_empty() { None } else { Some(&who) },
            };
            match commands::create_item(&args).await {
                Ok(card) => {
                    set_new_title.set(String::new());
                    store_add_card(&store, card);
                }
                Err(e) => store_flash_notice(&store, e, 5000),
            }
        });
    };

    view! {
        <form class="new-card-form" on:submit=create_card>
            <input
                type="text"
                placeholder="Add new card..."
                prop:value=move || new_title.get()
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="assignee-input"
                placeholder="Assignee"
                prop:value=move || assignee.get()
                on:input=move |ev| set_assignee.set(event_target_value(&ev))
            />
            <select on:change=move |ev| set_column.set(event_target_value(&ev).parse::<u32>().ok())>
                <option value="" selected=move || column.get().is_none()>"Ideas"</option>
                <For
                    each=move || store.columns().get()
                    key=|c| (c.id, c.title.clone())
                    children=move |c| {
                        let id = c.id;
                        view! {
                            <option value=id.to_string() selected=move || column.get() == Some(id)>
                                {c.title}
                            </option>
                        }
                    }
                />
            </select>
            <button type="submit">"Add"</button>
        </form>
    }
}
