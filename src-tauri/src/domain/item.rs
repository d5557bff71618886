//! Item Entity
//!
//! A work item on the board: a card bound to a column, or a flow idea
//! that has not been placed in a column yet.

use board_order::{ColumnId, ItemId, Lane, Placeable};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Card title
    pub title: String,
    /// Owning column (None = unplaced flow idea)
    pub column_id: Option<ColumnId>,
    /// 1-based position within the column
    pub position: i32,
    /// Optional assignee name
    pub assignee: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Item {
    /// Create a new item; position is assigned by the repository
    pub fn new(id: ItemId, title: String, column_id: Option<ColumnId>) -> Self {
        Self {
            id,
            title,
            column_id,
            position: 0,
            assignee: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Check if this is a flow idea (no column)
    pub fn is_unplaced(&self) -> bool {
        self.column_id.is_none()
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Placeable for Item {
    fn id(&self) -> ItemId {
        self.id
    }

    fn column_id(&self) -> Lane {
        self.column_id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_column_id(&mut self, column_id: Lane) {
        self.column_id = column_id;
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}
