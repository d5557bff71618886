//! Column Entity
//!
//! Columns are the engine's read-only descriptor; the backend only adds
//! entity identity on top.

pub use board_order::Column;

use super::entity::Entity;

impl Entity for Column {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_creation() {
        let column = Column::new(1, "Backlog", 1);
        assert_eq!(column.id(), 1);
        assert_eq!(column.title, "Backlog");
    }
}
