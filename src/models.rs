//! Frontend Models
//!
//! Data structures matching backend entities.

use board_order::{ColumnId, ItemId, Lane, Placeable};
use serde::{Deserialize, Serialize};

/// Column data structure (matches backend)
pub type BoardColumn = board_order::Column;

/// Card data structure (matches backend `Item`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: ItemId,
    pub title: String,
    pub column_id: Option<ColumnId>,
    pub position: i32,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Placeable for Card {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_from_backend_json() {
        let json = r#"{"id":4,"title":"Write docs","column_id":2,"position":3,"assignee":null,"created_at":1700000000000,"updated_at":null}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, 4);
        assert_eq!(card.column_id, Some(2));
        assert_eq!(card.created_at, Some(1_700_000_000_000));
    }

    #[test]
    fn test_card_missing_optional_fields() {
        let json = r#"{"id":1,"title":"Idea","column_id":null,"position":1}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.column_id, None);
        assert_eq!(card.assignee, None);
    }
}
