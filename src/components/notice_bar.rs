//! Notice Bar Component
//!
//! Transient message above the board, e.g. when drop writes fail.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    view! {
        {move || store.notice().get().map(|message| view! {
            <div class="notice-bar" role="status">
                <span class="notice-text">{message}</span>
                <button
                    class="notice-reload"
                    on:click=move |_| {
                        store.notice().set(None);
                        ctx.reload();
                    }
                >
                    "Reload"
                </button>
                <button class="notice-dismiss" on:click=move |_| store.notice().set(None)>"×"</button>
            </div>
        })}
    }
}
