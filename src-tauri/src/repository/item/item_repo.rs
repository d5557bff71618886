//! Item Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Item CRUD operations.
//! Position management lives in item_positioning.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use super::super::db::{live, SharedConnection};
use super::super::traits::Repository;
use super::item_positioning::next_position_in;
use crate::domain::{DomainError, DomainResult, Item};

pub(super) const ITEM_COLUMNS: &str =
    "id, title, column_id, position, assignee, created_at, updated_at";

/// SQLite implementation of Item repository
#[derive(Clone)]
pub struct ItemRepository {
    pub(super) conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    /// Insert at the end of the item's column
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Item title is empty".to_string()));
        }

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        if let Some(column_id) = entity.column_id {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM columns WHERE id = ?)",
                params![column_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(DomainError::NotFound(format!("Column {} not found", column_id)));
            }
        }

        // Same lock: next_position() would deadlock here
        let position = next_position_in(conn, entity.column_id)?;
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO items (title, column_id, position, assignee, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
            params![title, entity.column_id, position, entity.assignee, now, now],
        )?;

        Ok(Item {
            id: conn.last_insert_rowid() as u32,
            title: title.to_string(),
            column_id: entity.column_id,
            position,
            assignee: entity.assignee.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Item>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let item = conn
            .query_row(
                &format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS),
                params![id],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM items ORDER BY column_id NULLS FIRST, position ASC, id ASC",
            ITEM_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_item)?;
        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }
        Ok(items)
    }

    /// Update the descriptive fields; placement goes through apply_patch
    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let now = chrono::Utc::now().timestamp_millis();
        let changed = conn.execute(
            "UPDATE items SET title = ?, assignee = ?, updated_at = ? WHERE id = ?",
            params![entity.title, entity.assignee, now, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", entity.id)));
        }

        let mut updated = entity.clone();
        updated.updated_at = Some(now);
        Ok(updated)
    }

    /// Delete without resequencing; the next move in the column closes the gap
    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        conn.execute("DELETE FROM items WHERE id = ?", params![id])?;
        Ok(())
    }
}

/// Convert a database row to Item
pub(super) fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        column_id: row.get(2)?,
        position: row.get(3)?,
        assignee: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
