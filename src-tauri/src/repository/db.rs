//! Database Connection and Setup
//!
//! Manages the SQLite connection and additive migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared connection handle used by every repository
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Open (or create) the database at `db_path` and run migrations.
///
/// `:memory:` gives a private in-memory database, used by tests.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    log::info!("database ready at {}", db_path.display());
    Ok(state)
}

/// Borrow the live connection out of a guard
pub(crate) fn live(guard: &Option<Connection>) -> DomainResult<&Connection> {
    guard
        .as_ref()
        .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS columns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            column_id INTEGER,
            position INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER,
            updated_at INTEGER
        )",
        [],
    )?;

    // Added after the first release
    if !column_exists(conn, "items", "assignee")? {
        conn.execute("ALTER TABLE items ADD COLUMN assignee TEXT", [])
            .map_err(|e| DomainError::Internal(format!("Failed to add assignee: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_column ON items(column_id, position)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_repeatable() {
        let state = init_db(Path::new(":memory:")).await.expect("init");
        let guard = state.conn.lock().await;
        let conn = live(&guard).expect("conn");
        run_migrations(conn).expect("second run");
        assert!(column_exists(conn, "items", "assignee").unwrap());
        assert!(!column_exists(conn, "items", "parent_id").unwrap());
    }

    #[tokio::test]
    async fn test_uninitialized_state() {
        let state = DbState::new();
        let guard = state.conn.lock().await;
        assert!(live(&guard).is_err());
    }
}
