//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the board from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the board from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Pointer drag state shared by every view
    pub dnd: DndSignals,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), dnd: DndSignals) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            dnd,
        }
    }

    /// Trigger a reload of columns and cards
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
