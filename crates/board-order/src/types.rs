//! Core Types
//!
//! Identifiers, the `Placeable` contract and drop targets shared by every
//! part of the engine.

use serde::{Deserialize, Serialize};

/// Stable item identifier, unique across the whole board
pub type ItemId = u32;

/// Column identifier
pub type ColumnId = u32;

/// The ordered container an item lives in.
///
/// `Some(column)` for column-bound cards, `None` for flow ideas that have
/// not been placed in a column yet.
pub type Lane = Option<ColumnId>;

/// Anything the engine can order.
///
/// The engine only ever reads the id and reassigns `column_id` and
/// `position`; every other field of the implementing type is opaque.
pub trait Placeable {
    fn id(&self) -> ItemId;
    fn column_id(&self) -> Lane;
    fn position(&self) -> i32;
    fn set_column_id(&mut self, column_id: Lane);
    fn set_position(&mut self, position: i32);
}

/// Column descriptor (read-only for the engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Position among columns, never touched by item ordering
    pub position: i32,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            title: title.into(),
            position,
        }
    }
}

/// Which side of a sibling the dragged item lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Before,
    After,
}

/// Drop target reported by the view layer for a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// Background of a column: append to it
    Column(Lane),
    /// Adjacent to another item
    Item(ItemId, Edge),
    /// Gap index inside a lane (drop zone between two items)
    Slot(Lane, i32),
}

impl DropTarget {
    /// Drop before `id`
    pub fn before(id: ItemId) -> Self {
        DropTarget::Item(id, Edge::Before)
    }

    /// Drop after `id`
    pub fn after(id: ItemId) -> Self {
        DropTarget::Item(id, Edge::After)
    }
}
