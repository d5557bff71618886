//! Shared fixtures for unit tests

use crate::types::{Column, ColumnId, ItemId, Lane, Placeable};

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: ItemId,
    pub title: String,
    pub column_id: Lane,
    pub position: i32,
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

pub fn card(id: ItemId, column_id: Lane, position: i32) -> Card {
    Card {
        id,
        title: format!("Card {}", id),
        column_id,
        position,
    }
}

/// Columns with the given ids, positioned in the given order
pub fn columns(ids: &[ColumnId]) -> Vec<Column> {
    ids.iter()
        .enumerate()
        .map(|(i, &id)| Column::new(id, format!("Column {}", id), i as i32 + 1))
        .collect()
}
