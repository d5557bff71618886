//! Flow Board Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::Manager;

mod commands;
mod domain;
mod repository;

use repository::{init_db, ColumnRepository, DbState, ItemRepository};

/// Application state shared across commands
pub struct AppState {
    pub item_repo: ItemRepository,
    pub column_repo: ColumnRepository,
}

impl AppState {
    pub fn new(db_state: &DbState) -> Self {
        Self {
            item_repo: ItemRepository::new(db_state.conn.clone()),
            column_repo: ColumnRepository::new(db_state.conn.clone()),
        }
    }
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir.join("flow_board.db"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "FlowBoard")?;

            let db_path = get_db_path(&app_handle)?;
            let db_state = tauri::async_runtime::block_on(init_db(&db_path))?;
            rolling_logger::info(&format!("Database opened at {}", db_path.display()));

            app.manage(AppState::new(&db_state));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Columns
            commands::list_columns,
            commands::create_column,
            commands::rename_column,
            commands::delete_column,
            // Items
            commands::list_items,
            commands::create_item,
            commands::update_item,
            commands::delete_item,
            // Ordering
            commands::persist_item,
            commands::reindex_column,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
