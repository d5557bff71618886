//! Tauri Commands for Columns

use board_order::ColumnId;
use tauri::State;

use crate::domain::Column;
use crate::repository::Repository;
use crate::AppState;

/// List columns ordered by position
#[tauri::command]
pub async fn list_columns(state: State<'_, AppState>) -> Result<Vec<Column>, String> {
    state.column_repo.list().await.map_err(|e| e.to_string())
}

/// Create a column at the right end of the board
#[tauri::command]
pub async fn create_column(state: State<'_, AppState>, title: String) -> Result<Column, String> {
    state
        .column_repo
        .create(&Column::new(0, title, 0))
        .await
        .map_err(|e| e.to_string())
}

/// Rename a column, keeping its place
#[tauri::command]
pub async fn rename_column(state: State<'_, AppState>, id: ColumnId, title: String) -> Result<Column, String> {
    let existing = state
        .column_repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Column {} not found", id))?;

    state
        .column_repo
        .update(&Column { title, ..existing })
        .await
        .map_err(|e| e.to_string())
}

/// Delete a column; its cards go back to the ideas lane
#[tauri::command]
pub async fn delete_column(state: State<'_, AppState>, id: ColumnId) -> Result<(), String> {
    state.column_repo.delete(id).await.map_err(|e| e.to_string())
}
