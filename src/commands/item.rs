//! Item Commands
//!
//! Frontend bindings for card-related backend commands.

use board_order::{ColumnId, ItemId, PositionPatch};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{call, to_args};
use crate::models::Card;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct CreateItemArgs<'a> {
    pub title: &'a str,
    #[serde(rename = "columnId")]
    pub column_id: Option<ColumnId>,
    pub assignee: Option<&'a str>,
}

#[derive(Serialize)]
struct IdArgs {
    id: ItemId,
}

#[derive(Serialize)]
struct UpdateItemArgs<'a> {
    id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<&'a str>,
}

#[derive(Serialize)]
struct PersistItemArgs {
    id: ItemId,
    patch: PositionPatch,
}

#[derive(Serialize)]
struct ColumnIdArgs {
    #[serde(rename = "columnId")]
    column_id: Option<ColumnId>,
}

// ========================
// Commands
// ========================

pub async fn list_items() -> Result<Vec<Card>, String> {
    call("list_items", JsValue::NULL).await
}

pub async fn create_item(args: &CreateItemArgs<'_>) -> Result<Card, String> {
    call("create_item", to_args(args)?).await
}

pub async fn update_item(id: ItemId, title: Option<&str>, assignee: Option<&str>) -> Result<Card, String> {
    call("update_item", to_args(&UpdateItemArgs { id, title, assignee })?).await
}

pub async fn delete_item(id: ItemId) -> Result<(), String> {
    call("delete_item", to_args(&IdArgs { id })?).await
}

/// Write one card's position (and column, when relocating)
pub async fn persist_item(id: ItemId, patch: PositionPatch) -> Result<(), String> {
    call("persist_item", to_args(&PersistItemArgs { id, patch })?).await
}

/// Rewrite a column to 1..N in its stored order; returns rows changed
pub async fn reindex_column(column_id: Option<ColumnId>) -> Result<usize, String> {
    call("reindex_column", to_args(&ColumnIdArgs { column_id })?).await
}
