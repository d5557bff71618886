//! Board Drag Controller
//!
//! Connects the pointer handlers to the ordering engine: hovers reorder
//! the store's board in place, a release dispatches the resulting writes
//! without waiting for them. Each accepted write is recorded on the board
//! as it settles.

use std::cell::RefCell;

use board_order::{dispatch_with, DragSession, DropTarget, FinalizationPlan, ItemId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DragListener;

use crate::commands::TauriPersistence;
use crate::store::{store_flash_notice, AppStateStoreFields, AppStore};

/// How long a failed-write notice stays up
const NOTICE_MS: u32 = 5000;

pub struct BoardDrag {
    store: AppStore,
    session: RefCell<DragSession>,
}

impl BoardDrag {
    pub fn new(store: AppStore) -> Self {
        Self {
            store,
            session: RefCell::new(DragSession::new()),
        }
    }
}

fn log(message: String) {
    web_sys::console::log_1(&message.into());
}

impl DragListener for BoardDrag {
    fn start(&self, item_id: ItemId) -> bool {
        let started = self
            .store
            .board()
            .with_untracked(|board| self.session.borrow_mut().start(board, item_id));
        log(format!("[DND] start {} -> {}", item_id, started));
        started
    }

    fn hover(&self, target: DropTarget) {
        let mut session = self.session.borrow_mut();
        if !session.is_dragging() {
            return;
        }
        self.store.board().update(|board| {
            session.hover(board, target);
        });
    }

    fn release(&self, target: Option<DropTarget>) {
        let plan = self
            .store
            .board()
            .try_update(|board| self.session.borrow_mut().release(board, target))
            .flatten();

        match plan {
            Some(plan) => spawn_local(persist(self.store, plan)),
            None => log(format!("[DND] release on {:?}: nothing to persist", target)),
        }
    }

    fn cancel(&self) {
        if let Some(drag) = self.session.borrow_mut().cancel() {
            log(format!("[DND] cancelled drag of {}", drag.item_id));
        }
    }
}

async fn persist(store: AppStore, plan: FinalizationPlan) {
    log(format!(
        "[DND] dropped {} into {:?} at {}, {} writes",
        plan.item_id,
        plan.target,
        plan.index,
        plan.len()
    ));

    let report = dispatch_with(&plan, &TauriPersistence, |write, result| match result {
        // Only accepted writes count as stored; the rest are planned again next move
        Ok(()) => {
            store.board().update_untracked(|board| board.confirm(write));
        }
        Err(err) => {
            web_sys::console::warn_1(&format!("[DND] write for {} failed: {}", write.item_id, err).into());
        }
    })
    .await;

    if !report.is_complete() {
        store_flash_notice(
            &store,
            format!(
                "{} of {} position updates were not saved; the board may differ after reload",
                report.failed.len(),
                plan.len()
            ),
            NOTICE_MS,
        );
    }
}
