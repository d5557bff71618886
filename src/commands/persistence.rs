//! Drop Persistence
//!
//! Sends the engine's per-card writes to the backend over IPC.

use board_order::{async_trait, ItemId, ItemPersistence, PersistError, PositionPatch};

use super::item::persist_item;

/// `ItemPersistence` backed by the `persist_item` command
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriPersistence;

#[async_trait(?Send)]
impl ItemPersistence for TauriPersistence {
    async fn persist_item(&self, item_id: ItemId, patch: PositionPatch) -> Result<(), PersistError> {
        persist_item(item_id, patch).await.map_err(|message| {
            if message.starts_with("Not found") {
                PersistError::NotFound(item_id)
            } else {
                PersistError::Rejected(message)
            }
        })
    }
}
