//! Position Allocator
//!
//! Dense, 1-based positions for an ordered run of items.

use crate::types::{ItemId, Placeable};

/// Position given to the item at `rank` (0-based) in its lane
pub fn dense_position(rank: usize) -> i32 {
    rank as i32 + 1
}

/// One position assignment made by the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reassignment {
    pub item_id: ItemId,
    pub previous: i32,
    pub position: i32,
}

impl Reassignment {
    pub fn changed(&self) -> bool {
        self.previous != self.position
    }
}

/// Assign the dense position for `rank` to a single item
pub fn assign<T: Placeable>(item: &mut T, rank: usize) -> Reassignment {
    let previous = item.position();
    let position = dense_position(rank);
    item.set_position(position);
    Reassignment {
        item_id: item.id(),
        previous,
        position,
    }
}

/// Set every item's position to its 1-based index in `ordered`.
///
/// Returns one entry per item, changed or not.
pub fn allocate<T: Placeable>(ordered: &mut [T]) -> Vec<Reassignment> {
    ordered
        .iter_mut()
        .enumerate()
        .map(|(rank, item)| assign(item, rank))
        .collect()
}

/// True when `positions`, taken in order, are exactly 1..=N
pub fn is_dense<I>(positions: I) -> bool
where
    I: IntoIterator<Item = i32>,
{
    positions
        .into_iter()
        .enumerate()
        .all(|(rank, pos)| pos == dense_position(rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lane;

    #[derive(Debug, Clone, PartialEq)]
    struct Stub {
        id: ItemId,
        position: i32,
    }

    impl Placeable for Stub {
        fn id(&self) -> ItemId {
            self.id
        }
        fn column_id(&self) -> Lane {
            None
        }
        fn position(&self) -> i32 {
            self.position
        }
        fn set_column_id(&mut self, _column_id: Lane) {}
        fn set_position(&mut self, position: i32) {
            self.position = position;
        }
    }

    fn stubs(positions: &[i32]) -> Vec<Stub> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Stub { id: i as u32 + 10, position })
            .collect()
    }

    #[test]
    fn test_allocate_sets_one_based_index() {
        let mut items = stubs(&[7, 3, 3, 0]);
        allocate(&mut items);
        let positions: Vec<i32> = items.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_allocate_reports_changes() {
        let mut items = stubs(&[1, 5, 3]);
        let changes = allocate(&mut items);
        let changed: Vec<ItemId> = changes.iter().filter(|c| c.changed()).map(|c| c.item_id).collect();
        assert_eq!(changed, vec![11]);
        assert_eq!(changes[1].previous, 5);
        assert_eq!(changes[1].position, 2);
    }

    #[test]
    fn test_allocate_is_idempotent() {
        let mut once = stubs(&[4, 9, 2]);
        allocate(&mut once);
        let mut twice = once.clone();
        let changes = allocate(&mut twice);
        assert_eq!(once, twice);
        assert!(changes.iter().all(|c| !c.changed()));
    }

    #[test]
    fn test_allocate_empty() {
        let mut items: Vec<Stub> = Vec::new();
        assert!(allocate(&mut items).is_empty());
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense(vec![1, 2, 3]));
        assert!(is_dense(Vec::new()));
        assert!(!is_dense(vec![1, 3]));
        assert!(!is_dense(vec![0, 1]));
        assert!(!is_dense(vec![1, 1]));
    }
}
