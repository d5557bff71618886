//! Finalization
//!
//! Turns the board state at drop time into the authoritative position set
//! for the affected lanes, and the list of writes needed to persist it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::Board;
use crate::types::{ItemId, Lane, Placeable};

/// Fields to write for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionPatch {
    /// New position inside the item's current column
    Reorder { position: i32 },
    /// Column membership and position together
    Relocate { column_id: Lane, position: i32 },
}

impl PositionPatch {
    pub fn position(&self) -> i32 {
        match *self {
            PositionPatch::Reorder { position } | PositionPatch::Relocate { position, .. } => position,
        }
    }

    /// Target column when the patch moves the item
    pub fn column_id(&self) -> Option<Lane> {
        match *self {
            PositionPatch::Reorder { .. } => None,
            PositionPatch::Relocate { column_id, .. } => Some(column_id),
        }
    }
}

/// One persistence call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionWrite {
    pub item_id: ItemId,
    pub patch: PositionPatch,
}

/// Everything decided at drop time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizationPlan {
    pub item_id: ItemId,
    /// Lane the item was committed to before the drag
    pub origin: Lane,
    /// Lane the item was dropped in
    pub target: Lane,
    /// Final index of the item within `target`
    pub index: usize,
    pub writes: Vec<PositionWrite>,
}

impl FinalizationPlan {
    pub fn is_cross_column(&self) -> bool {
        self.origin != self.target
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn write_for(&self, item_id: ItemId) -> Option<&PositionWrite> {
        self.writes.iter().find(|w| w.item_id == item_id)
    }
}

/// Allocate dense positions for the lanes touched by a drop and collect
/// the writes to persist them.
///
/// The item's final lane and index are read back from `board`, and the
/// displayed positions there are updated in place. A write is planned for
/// the moving item and for every sibling whose committed placement differs
/// from its new one, so writes that failed earlier are retried here.
/// Returns `None` when the item is gone.
pub fn finalize<T: Placeable>(board: &mut Board<T>, item_id: ItemId, origin: Lane) -> Option<FinalizationPlan> {
    let (target, index) = board.locate(item_id)?;
    let mut writes = lane_writes(board, target, item_id);
    if origin != target {
        writes.extend(lane_writes(board, origin, item_id));
    }

    info!(
        item_id,
        ?origin,
        ?target,
        index,
        writes = writes.len(),
        "finalized move"
    );

    Some(FinalizationPlan {
        item_id,
        origin,
        target,
        index,
        writes,
    })
}

fn lane_writes<T: Placeable>(board: &mut Board<T>, lane: Lane, moving: ItemId) -> Vec<PositionWrite> {
    board
        .reallocate_lane(lane)
        .into_iter()
        .filter_map(|assignment| {
            let id = assignment.item_id;
            let position = assignment.position;
            let patch = match board.committed(id) {
                // Always written so the column change is committed
                _ if id == moving => PositionPatch::Relocate { column_id: lane, position },
                Some((stored, at)) if stored == lane && at == position => return None,
                Some((stored, _)) if stored == lane => PositionPatch::Reorder { position },
                _ => PositionPatch::Relocate { column_id: lane, position },
            };
            Some(PositionWrite { item_id: id, patch })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::move_item;
    use crate::testing::{card, columns, Card};
    use crate::types::DropTarget;

    fn board() -> Board<Card> {
        Board::new(
            columns(&[1, 2]),
            vec![
                card(1, Some(1), 1),
                card(2, Some(1), 2),
                card(3, Some(1), 3),
                card(4, Some(2), 1),
            ],
        )
    }

    #[test]
    fn test_same_column_writes_only_changed_siblings() {
        let mut b = board();
        move_item(&mut b, 3, DropTarget::before(2)).unwrap();
        let plan = finalize(&mut b, 3, Some(1)).unwrap();

        assert!(!plan.is_cross_column());
        assert_eq!(plan.index, 1);
        assert_eq!(plan.len(), 2);
        assert_eq!(
            plan.write_for(3).unwrap().patch,
            PositionPatch::Relocate { column_id: Some(1), position: 2 }
        );
        assert_eq!(plan.write_for(2).unwrap().patch, PositionPatch::Reorder { position: 3 });
        assert!(plan.write_for(1).is_none());
    }

    #[test]
    fn test_moving_item_always_written() {
        let mut b = board();
        let plan = finalize(&mut b, 1, Some(1)).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.writes[0].patch.position(), 1);
        assert_eq!(plan.writes[0].patch.column_id(), Some(Some(1)));
    }

    #[test]
    fn test_cross_column_resequences_origin() {
        let mut b = board();
        move_item(&mut b, 1, DropTarget::before(4)).unwrap();
        let plan = finalize(&mut b, 1, Some(1)).unwrap();

        assert!(plan.is_cross_column());
        assert_eq!(plan.target, Some(2));
        assert_eq!(
            plan.write_for(1).unwrap().patch,
            PositionPatch::Relocate { column_id: Some(2), position: 1 }
        );
        assert_eq!(plan.write_for(4).unwrap().patch, PositionPatch::Reorder { position: 2 });
        assert_eq!(plan.write_for(2).unwrap().patch, PositionPatch::Reorder { position: 1 });
        assert_eq!(plan.write_for(3).unwrap().patch, PositionPatch::Reorder { position: 2 });
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_board_positions_updated_in_place() {
        let mut b = board();
        move_item(&mut b, 3, DropTarget::before(1)).unwrap();
        finalize(&mut b, 3, Some(1)).unwrap();
        let positions: Vec<(ItemId, i32)> = b.lane(Some(1)).map(|c| (c.id, c.position)).collect();
        assert_eq!(positions, vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_unconfirmed_sibling_is_written_again() {
        let mut b = board();
        move_item(&mut b, 3, DropTarget::before(1)).unwrap();
        let first = finalize(&mut b, 3, Some(1)).unwrap();
        // Only the move itself reached the store
        b.confirm(first.write_for(3).unwrap());

        move_item(&mut b, 4, DropTarget::Column(Some(1))).unwrap();
        let second = finalize(&mut b, 4, Some(2)).unwrap();
        assert_eq!(second.write_for(1).unwrap().patch, PositionPatch::Reorder { position: 2 });
        assert_eq!(second.write_for(2).unwrap().patch, PositionPatch::Reorder { position: 3 });
        assert!(second.write_for(3).is_none());
        assert_eq!(
            second.write_for(4).unwrap().patch,
            PositionPatch::Relocate { column_id: Some(1), position: 4 }
        );
    }

    #[test]
    fn test_failed_relocation_is_retried_as_relocation() {
        let mut b = board();
        move_item(&mut b, 1, DropTarget::Column(Some(2))).unwrap();
        finalize(&mut b, 1, Some(1)).unwrap();

        move_item(&mut b, 2, DropTarget::before(4)).unwrap();
        let plan = finalize(&mut b, 2, Some(1)).unwrap();
        assert_eq!(
            plan.write_for(1).unwrap().patch,
            PositionPatch::Relocate { column_id: Some(2), position: 3 }
        );
    }

    #[test]
    fn test_missing_item_yields_no_plan() {
        let mut b = board();
        assert!(finalize(&mut b, 99, Some(1)).is_none());
    }

    #[test]
    fn test_patch_serialization() {
        let patch = PositionPatch::Relocate { column_id: None, position: 3 };
        let json = serde_json::to_value(patch).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "relocate", "column_id": null, "position": 3}));
    }
}
