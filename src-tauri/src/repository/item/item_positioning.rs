//! Item Positioning Operations
//!
//! Dense 1-based positions per column, and the single-item write the
//! ordering engine dispatches after a drop.

use async_trait::async_trait;
use board_order::{allocate, ItemId, ItemPersistence, Lane, PersistError, PositionPatch};
use rusqlite::{params, Connection};

use super::item_repo::{row_to_item, ITEM_COLUMNS};
use crate::domain::{DomainError, DomainResult, Item};
use crate::repository::db::live;

/// Trait for item positioning operations
#[async_trait]
pub trait ItemPositioningOperations {
    /// Next position at the end of a column (used in create)
    async fn next_position(&self, column_id: Lane) -> DomainResult<i32>;

    /// Items of one column ordered by position
    async fn list_lane(&self, column_id: Lane) -> DomainResult<Vec<Item>>;

    /// Rewrite a column to 1, 2, 3, ... keeping its current order.
    /// Returns how many rows changed.
    async fn reindex_lane(&self, column_id: Lane) -> DomainResult<usize>;

    /// Persist one item's position, and its column when relocating
    async fn apply_patch(&self, id: ItemId, patch: PositionPatch) -> DomainResult<()>;
}

pub(super) fn next_position_in(conn: &Connection, column_id: Lane) -> DomainResult<i32> {
    let position = conn.query_row(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM items WHERE column_id IS ?",
        params![column_id],
        |row| row.get(0),
    )?;
    Ok(position)
}

fn lane_items(conn: &Connection, column_id: Lane) -> DomainResult<Vec<Item>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM items WHERE column_id IS ? ORDER BY position, id",
        ITEM_COLUMNS
    ))?;
    let rows = stmt.query_map(params![column_id], row_to_item)?;
    let mut items = Vec::new();
    for item in rows {
        items.push(item?);
    }
    Ok(items)
}

#[async_trait]
impl ItemPositioningOperations for super::item_repo::ItemRepository {
    async fn next_position(&self, column_id: Lane) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        next_position_in(live(&guard)?, column_id)
    }

    async fn list_lane(&self, column_id: Lane) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        lane_items(live(&guard)?, column_id)
    }

    async fn reindex_lane(&self, column_id: Lane) -> DomainResult<usize> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let mut items = lane_items(conn, column_id)?;
        let now = chrono::Utc::now().timestamp_millis();
        let mut changed = 0;
        for assignment in allocate(&mut items).into_iter().filter(|a| a.changed()) {
            conn.execute(
                "UPDATE items SET position = ?, updated_at = ? WHERE id = ?",
                params![assignment.position, now, assignment.item_id],
            )?;
            changed += 1;
        }

        log::info!("reindexed column {:?}: {} rows changed", column_id, changed);
        Ok(changed)
    }

    async fn apply_patch(&self, id: ItemId, patch: PositionPatch) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let now = chrono::Utc::now().timestamp_millis();

        let changed = match patch {
            PositionPatch::Reorder { position } => conn.execute(
                "UPDATE items SET position = ?, updated_at = ? WHERE id = ?",
                params![position, now, id],
            )?,
            PositionPatch::Relocate { column_id, position } => {
                if let Some(cid) = column_id {
                    let exists: bool = conn.query_row(
                        "SELECT EXISTS(SELECT 1 FROM columns WHERE id = ?)",
                        params![cid],
                        |row| row.get(0),
                    )?;
                    if !exists {
                        return Err(DomainError::InvalidInput(format!("Column {} does not exist", cid)));
                    }
                }
                conn.execute(
                    "UPDATE items SET column_id = ?, position = ?, updated_at = ? WHERE id = ?",
                    params![column_id, position, now, id],
                )?
            }
        };

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ItemPersistence for super::item_repo::ItemRepository {
    async fn persist_item(&self, item_id: ItemId, patch: PositionPatch) -> Result<(), PersistError> {
        self.apply_patch(item_id, patch).await.map_err(|e| match e {
            DomainError::NotFound(_) => PersistError::NotFound(item_id),
            other => PersistError::Rejected(other.to_string()),
        })
    }
}
