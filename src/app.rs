//! Flow Board Frontend App
//!
//! Loads columns and cards, wires pointer drag-and-drop to the ordering
//! engine once, and switches between the kanban and list views.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_handlers, create_dnd_signals};
use reactive_stores::Store;

use crate::commands;
use crate::components::{KanbanBoard, ListView, NewCardForm, NoticeBar};
use crate::context::AppContext;
use crate::drag::BoardDrag;
use crate::store::{store_flash_notice, store_load, AppState, AppStateStoreFields, ViewMode};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let dnd = create_dnd_signals();
    provide_context(AppContext::new((reload_trigger, set_reload_trigger), dnd));

    bind_global_handlers(dnd, Rc::new(BoardDrag::new(store)));

    // Load columns and cards on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        if dnd.dragging_id_read.get_untracked().is_some() {
            web_sys::console::log_1(&"[APP] reload skipped during drag".into());
            return;
        }
        web_sys::console::log_1(&format!("[APP] Loading board, trigger={}", trigger).into());
        spawn_local(async move {
            let loaded = match commands::list_columns().await {
                Ok(columns) => commands::list_items().await.map(|cards| (columns, cards)),
                Err(e) => Err(e),
            };
            match loaded {
                Ok((columns, cards)) => {
                    web_sys::console::log_1(
                        &format!("[APP] Loaded {} columns, {} cards", columns.len(), cards.len()).into(),
                    );
                    store_load(&store, columns, cards);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[APP] load failed: {}", e).into());
                    store_flash_notice(&store, format!("Could not load the board: {}", e), 8000);
                }
            }
        });
    });

    let view_button = move |mode: ViewMode, label: &'static str| {
        view! {
            <button
                class=move || if store.view_mode().get() == mode { "view-btn active" } else { "view-btn" }
                on:click=move |_| store.view_mode().set(mode)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Flow Board"</h1>
                <div class="view-switch">
                    {view_button(ViewMode::Kanban, "Board")}
                    {view_button(ViewMode::List, "List")}
                </div>
            </header>

            <NewCardForm />
            <NoticeBar />

            {move || match store.view_mode().get() {
                ViewMode::Kanban => view! { <KanbanBoard /> }.into_any(),
                ViewMode::List => view! { <ListView /> }.into_any(),
            }}

            <p class="item-count">
                {move || format!("{} cards, {} columns", store.board().with(|b| b.len()), store.columns().with(|c| c.len()))}
            </p>
        </div>
    }
}
