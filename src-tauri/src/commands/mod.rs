//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod column_cmd;
mod item_cmd;

pub use column_cmd::*;
pub use item_cmd::*;
