//! Tauri Commands for Items
//!
//! Item CRUD plus the per-item position write used after a drag.

use board_order::{ColumnId, ItemId, PositionPatch};
use tauri::State;

use crate::domain::Item;
use crate::repository::{ItemPositioningOperations, Repository};
use crate::AppState;

/// List all items, grouped by column and ordered by position
#[tauri::command]
pub async fn list_items(state: State<'_, AppState>) -> Result<Vec<Item>, String> {
    state.item_repo.list().await.map_err(|e| e.to_string())
}

/// Create an item at the end of its column (None = flow idea)
#[tauri::command]
pub async fn create_item(
    state: State<'_, AppState>,
    title: String,
    column_id: Option<ColumnId>,
    assignee: Option<String>,
) -> Result<Item, String> {
    let mut item = Item::new(0, title, column_id);
    item.assignee = assignee;
    state.item_repo.create(&item).await.map_err(|e| e.to_string())
}

/// Update title and/or assignee
#[tauri::command]
pub async fn update_item(
    state: State<'_, AppState>,
    id: ItemId,
    title: Option<String>,
    assignee: Option<String>,
) -> Result<Item, String> {
    let existing = state
        .item_repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Item {} not found", id))?;

    let updated = Item {
        title: title.unwrap_or(existing.title.clone()),
        assignee: assignee.or(existing.assignee.clone()),
        ..existing
    };
    state.item_repo.update(&updated).await.map_err(|e| e.to_string())
}

/// Delete an item (its column is not resequenced)
#[tauri::command]
pub async fn delete_item(state: State<'_, AppState>, id: ItemId) -> Result<(), String> {
    state.item_repo.delete(id).await.map_err(|e| e.to_string())
}

/// Persist one item's position after a drop
#[tauri::command]
pub async fn persist_item(
    state: State<'_, AppState>,
    id: ItemId,
    patch: PositionPatch,
) -> Result<(), String> {
    state.item_repo.apply_patch(id, patch).await.map_err(|e| {
        log::warn!("persist_item {} failed: {}", id, e);
        e.to_string()
    })
}

/// Rewrite a column's positions to 1..N (None = flow ideas)
#[tauri::command]
pub async fn reindex_column(
    state: State<'_, AppState>,
    column_id: Option<ColumnId>,
) -> Result<usize, String> {
    state.item_repo.reindex_lane(column_id).await.map_err(|e| e.to_string())
}
