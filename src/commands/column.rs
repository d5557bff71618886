//! Column Commands

use board_order::ColumnId;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{call, to_args};
use crate::models::BoardColumn;

#[derive(Serialize)]
struct CreateColumnArgs<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct RenameColumnArgs<'a> {
    id: ColumnId,
    title: &'a str,
}

#[derive(Serialize)]
struct ColumnIdArgs {
    id: ColumnId,
}

pub async fn list_columns() -> Result<Vec<BoardColumn>, String> {
    call("list_columns", JsValue::NULL).await
}

pub async fn create_column(title: &str) -> Result<BoardColumn, String> {
    call("create_column", to_args(&CreateColumnArgs { title })?).await
}

pub async fn rename_column(id: ColumnId, title: &str) -> Result<BoardColumn, String> {
    call("rename_column", to_args(&RenameColumnArgs { id, title })?).await
}

/// Cards of the deleted column come back as ideas
pub async fn delete_column(id: ColumnId) -> Result<(), String> {
    call("delete_column", to_args(&ColumnIdArgs { id })?).await
}
