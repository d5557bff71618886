//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The board
//! itself is the engine's `Board<Card>`; drags mutate it in place.

use board_order::{Board, ItemId, Lane};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{BoardColumn, Card};

/// Which view adapter renders the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Kanban,
    List,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Columns ordered by position
    pub columns: Vec<BoardColumn>,
    /// Every card, grouped by lane in display order
    pub board: Board<Card>,
    pub view_mode: ViewMode,
    /// Transient message shown above the board (failed writes, load errors)
    pub notice: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Board Helpers
// ========================

/// Cards of one lane in display order
pub fn lane_cards(board: &Board<Card>, lane: Lane) -> Vec<Card> {
    board.lane(lane).cloned().collect()
}

// ========================
// Store Helper Functions
// ========================

/// Replace everything with freshly loaded data
pub fn store_load(store: &AppStore, columns: Vec<BoardColumn>, cards: Vec<Card>) {
    store.board().set(Board::from_persisted(columns.clone(), cards));
    store.columns().set(columns);
}

/// Add a column to the board
pub fn store_add_column(store: &AppStore, column: BoardColumn) {
    store.board().update(|b| b.add_column(column.clone()));
    store.columns().update(|columns| {
        columns.push(column);
        columns.sort_by_key(|c| (c.position, c.id));
    });
}

/// Replace a column's title after a rename
pub fn store_rename_column(store: &AppStore, column: BoardColumn) {
    store.columns().update(|columns| {
        if let Some(existing) = columns.iter_mut().find(|c| c.id == column.id) {
            *existing = column;
        }
    });
}

/// Add a new card at the end of its lane
pub fn store_add_card(store: &AppStore, card: Card) {
    store.board().update(|b| b.push(card));
}

/// Update a card by ID, keeping its place
pub fn store_update_card(store: &AppStore, card: Card) {
    store.board().update(|b| {
        b.replace(card);
    });
}

/// Remove a card from the store by ID
pub fn store_remove_card(store: &AppStore, card_id: ItemId) {
    store.board().update(|b| {
        b.remove(card_id);
    });
}

/// Show a notice; it clears itself after `ms` unless replaced
pub fn store_flash_notice(store: &AppStore, message: String, ms: u32) {
    let store = *store;
    store.notice().set(Some(message.clone()));
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(ms).await;
        if store.notice().get_untracked().as_deref() == Some(message.as_str()) {
            store.notice().set(None);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_order::{move_item, DropTarget, PositionPatch, PositionWrite};

    fn card(id: ItemId, column_id: Lane, position: i32) -> Card {
        Card {
            id,
            title: format!("card {}", id),
            column_id,
            position,
            assignee: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn board() -> Board<Card> {
        Board::from_persisted(
            vec![BoardColumn::new(1, "Todo", 1), BoardColumn::new(2, "Done", 2)],
            vec![card(1, Some(1), 1), card(2, Some(1), 2), card(3, Some(2), 1), card(4, None, 1)],
        )
    }

    fn ids(cards: Vec<Card>) -> Vec<ItemId> {
        cards.into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_lane_cards_in_display_order() {
        let mut b = board();
        move_item(&mut b, 2, DropTarget::before(1)).unwrap();
        assert_eq!(ids(lane_cards(&b, Some(1))), vec![2, 1]);
        assert_eq!(ids(lane_cards(&b, None)), vec![4]);
    }

    #[test]
    fn test_rename_after_failed_write_keeps_pending_position() {
        let mut b = board();
        move_item(&mut b, 2, DropTarget::before(1)).unwrap();
        board_order::finalize(&mut b, 2, Some(1)).unwrap();
        b.confirm(&PositionWrite { item_id: 2, patch: PositionPatch::Relocate { column_id: Some(1), position: 1 } });

        // The backend still has card 1 at position 1
        let mut renamed = card(1, Some(1), 1);
        renamed.title = "renamed".to_string();
        assert!(b.replace(renamed));

        let todo = lane_cards(&b, Some(1));
        assert_eq!(ids(todo.clone()), vec![2, 1]);
        assert_eq!(todo[1].title, "renamed");
        assert_eq!(todo[1].position, 2);
        assert_eq!(b.committed(1), Some((Some(1), 1)));
    }
}
