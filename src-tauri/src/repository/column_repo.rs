//! Column Repository
//!
//! SQLite-backed CRUD for board columns.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::db::{live, SharedConnection};
use super::traits::Repository;
use crate::domain::{Column, DomainError, DomainResult};

/// SQLite implementation of Column repository
#[derive(Clone)]
pub struct ColumnRepository {
    conn: SharedConnection,
}

impl ColumnRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Column> for ColumnRepository {
    async fn create(&self, entity: &Column) -> DomainResult<Column> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Column title is empty".to_string()));
        }

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let position: i32 = conn.query_row(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM columns",
            [],
            |row| row.get(0),
        )?;
        conn.execute(
            "INSERT INTO columns (title, position) VALUES (?, ?)",
            params![title, position],
        )?;

        Ok(Column::new(conn.last_insert_rowid() as u32, title, position))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Column>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let column = conn
            .query_row(
                "SELECT id, title, position FROM columns WHERE id = ?",
                params![id],
                |row| Ok(Column::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(column)
    }

    async fn list(&self) -> DomainResult<Vec<Column>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let mut stmt = conn.prepare("SELECT id, title, position FROM columns ORDER BY position, id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Column::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?))
        })?;
        let mut columns = Vec::new();
        for column in rows {
            columns.push(column?);
        }
        Ok(columns)
    }

    async fn update(&self, entity: &Column) -> DomainResult<Column> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Column title is empty".to_string()));
        }

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        let changed = conn.execute(
            "UPDATE columns SET title = ?, position = ? WHERE id = ?",
            params![title, entity.position, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Column {} not found", entity.id)));
        }
        Ok(Column::new(entity.id, title, entity.position))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        if conn.execute("DELETE FROM columns WHERE id = ?", params![id])? == 0 {
            return Err(DomainError::NotFound(format!("Column {} not found", id)));
        }

        // Cards of a deleted column become flow ideas again, keeping their
        // old positions until the ideas lane is resequenced
        let moved = conn.execute(
            "UPDATE items SET column_id = NULL, updated_at = ? WHERE column_id = ?",
            params![chrono::Utc::now().timestamp_millis(), id],
        )?;
        log::info!("deleted column {}: {} cards moved to ideas", id, moved);
        Ok(())
    }
}
