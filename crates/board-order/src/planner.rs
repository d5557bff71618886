//! Local Reorder Planner
//!
//! Applies one drop target to the in-memory board. Synchronous and
//! network-free; only list order and the moving item's column change.
//! Positions are left alone here and rewritten at finalization.

use tracing::debug;

use crate::board::Board;
use crate::error::ResolveError;
use crate::types::{Column, DropTarget, Edge, ItemId, Lane, Placeable};

/// What a planner call did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing to do (self-drop, same slot, or same-column background)
    Unchanged,
    /// Moved inside its lane
    Reordered { lane: Lane, from: usize, to: usize },
    /// Moved into another lane at `index`
    Relocated { from: Lane, to: Lane, index: usize },
}

impl MoveOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, MoveOutcome::Unchanged)
    }
}

/// Where in the target lane the item should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    /// Append
    End,
    /// Gap index counted on the lane as currently displayed
    Gap(usize),
    /// Dropped on itself
    Itself,
}

/// Move `item_id` according to `target`.
///
/// On `Err` the board is untouched.
pub fn move_item<T: Placeable>(
    board: &mut Board<T>,
    item_id: ItemId,
    target: DropTarget,
) -> Result<MoveOutcome, ResolveError> {
    let (source, from) = board.locate(item_id).ok_or(ResolveError::UnknownItem(item_id))?;
    let (lane, insertion) = resolve(board, item_id, target)?;

    let outcome = if insertion == Insertion::Itself {
        MoveOutcome::Unchanged
    } else if lane == source {
        move_within(board, item_id, lane, from, insertion)
    } else {
        move_across(board, item_id, source, lane, insertion)
    };

    debug!(item_id, ?target, ?outcome, "planned move");
    Ok(outcome)
}

/// Apply a move to a flat collection.
///
/// Returns `items` as given when the move is a no-op or cannot be
/// resolved, otherwise the regrouped collection.
pub fn reorder<T: Placeable + Clone>(
    columns: &[Column],
    items: Vec<T>,
    item_id: ItemId,
    target: DropTarget,
) -> Vec<T> {
    let mut board = Board::new(columns.to_vec(), items.iter().cloned());
    match move_item(&mut board, item_id, target) {
        Ok(MoveOutcome::Unchanged) => items,
        Ok(_) => board.into_items(),
        Err(err) => {
            debug!(item_id, %err, "move ignored");
            items
        }
    }
}

fn resolve<T: Placeable>(
    board: &Board<T>,
    item_id: ItemId,
    target: DropTarget,
) -> Result<(Lane, Insertion), ResolveError> {
    match target {
        DropTarget::Column(lane) => {
            ensure_known(board, lane)?;
            Ok((lane, Insertion::End))
        }
        DropTarget::Item(target_id, edge) => {
            if target_id == item_id {
                let (lane, _) = board.locate(item_id).ok_or(ResolveError::UnknownItem(item_id))?;
                return Ok((lane, Insertion::Itself));
            }
            let (lane, index) = board
                .locate(target_id)
                .ok_or(ResolveError::UnknownTarget(target_id))?;
            let gap = match edge {
                Edge::Before => index,
                Edge::After => index + 1,
            };
            Ok((lane, Insertion::Gap(gap)))
        }
        DropTarget::Slot(lane, index) => {
            ensure_known(board, lane)?;
            let len = board.lane_ids(lane).len();
            let gap = index.clamp(0, len as i32) as usize;
            Ok((lane, Insertion::Gap(gap)))
        }
    }
}

fn ensure_known<T: Placeable>(board: &Board<T>, lane: Lane) -> Result<(), ResolveError> {
    match lane {
        Some(column_id) if !board.is_known_lane(lane) => Err(ResolveError::UnknownColumn(column_id)),
        _ => Ok(()),
    }
}

fn move_within<T: Placeable>(
    board: &mut Board<T>,
    item_id: ItemId,
    lane: Lane,
    from: usize,
    insertion: Insertion,
) -> MoveOutcome {
    let gap = match insertion {
        // Background of its own column: already in it
        Insertion::End | Insertion::Itself => return MoveOutcome::Unchanged,
        Insertion::Gap(gap) => gap,
    };

    // Removing the item first shifts every later gap down by one
    let last = board.lane_ids(lane).len().saturating_sub(1);
    let to = if from < gap { gap - 1 } else { gap }.min(last);
    if to == from {
        return MoveOutcome::Unchanged;
    }

    board.take_from_lane(item_id);
    let to = board.insert_into_lane(lane, to, item_id);
    MoveOutcome::Reordered { lane, from, to }
}

fn move_across<T: Placeable>(
    board: &mut Board<T>,
    item_id: ItemId,
    source: Lane,
    lane: Lane,
    insertion: Insertion,
) -> MoveOutcome {
    board.take_from_lane(item_id);
    if let Some(item) = board.get_mut(item_id) {
        item.set_column_id(lane);
    }
    let index = match insertion {
        Insertion::Gap(gap) => gap,
        Insertion::End | Insertion::Itself => usize::MAX,
    };
    let index = board.insert_into_lane(lane, index, item_id);
    MoveOutcome::Relocated {
        from: source,
        to: lane,
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{card, columns, Card};

    fn board() -> Board<Card> {
        Board::new(
            columns(&[1, 2]),
            vec![
                card(1, Some(1), 1),
                card(2, Some(1), 2),
                card(3, Some(1), 3),
                card(4, Some(2), 1),
                card(5, Some(2), 2),
            ],
        )
    }

    #[test]
    fn test_same_column_move_up() {
        let mut b = board();
        let outcome = move_item(&mut b, 3, DropTarget::before(1)).unwrap();
        assert_eq!(outcome, MoveOutcome::Reordered { lane: Some(1), from: 2, to: 0 });
        assert_eq!(b.lane_ids(Some(1)), &[3, 1, 2]);
    }

    #[test]
    fn test_same_column_move_down_adjusts_for_removal() {
        let mut b = board();
        let outcome = move_item(&mut b, 1, DropTarget::after(3)).unwrap();
        assert_eq!(outcome, MoveOutcome::Reordered { lane: Some(1), from: 0, to: 2 });
        assert_eq!(b.lane_ids(Some(1)), &[2, 3, 1]);

        let mut b = board();
        move_item(&mut b, 1, DropTarget::before(3)).unwrap();
        assert_eq!(b.lane_ids(Some(1)), &[2, 1, 3]);
    }

    #[test]
    fn test_same_slot_is_unchanged() {
        let mut b = board();
        let before = b.clone();
        assert!(move_item(&mut b, 2, DropTarget::before(3)).unwrap().is_unchanged());
        assert!(move_item(&mut b, 2, DropTarget::after(1)).unwrap().is_unchanged());
        assert!(move_item(&mut b, 2, DropTarget::before(2)).unwrap().is_unchanged());
        assert_eq!(b, before);
    }

    #[test]
    fn test_same_column_background_is_noop() {
        let mut b = board();
        let before = b.clone();
        assert!(move_item(&mut b, 1, DropTarget::Column(Some(1))).unwrap().is_unchanged());
        assert_eq!(b, before);
    }

    #[test]
    fn test_cross_column_before_target() {
        let mut b = board();
        let outcome = move_item(&mut b, 2, DropTarget::before(5)).unwrap();
        assert_eq!(outcome, MoveOutcome::Relocated { from: Some(1), to: Some(2), index: 1 });
        assert_eq!(b.lane_ids(Some(1)), &[1, 3]);
        assert_eq!(b.lane_ids(Some(2)), &[4, 2, 5]);
        assert_eq!(b.get(2).unwrap().column_id, Some(2));
    }

    #[test]
    fn test_cross_column_after_target() {
        let mut b = board();
        move_item(&mut b, 2, DropTarget::after(5)).unwrap();
        assert_eq!(b.lane_ids(Some(2)), &[4, 5, 2]);
    }

    #[test]
    fn test_cross_column_background_appends() {
        let mut b = board();
        move_item(&mut b, 1, DropTarget::Column(Some(2))).unwrap();
        assert_eq!(b.lane_ids(Some(2)), &[4, 5, 1]);
    }

    #[test]
    fn test_drop_on_empty_lane() {
        let mut b = board();
        let outcome = move_item(&mut b, 4, DropTarget::Column(None)).unwrap();
        assert_eq!(outcome, MoveOutcome::Relocated { from: Some(2), to: None, index: 0 });
        assert_eq!(b.lane_ids(None), &[4]);
        assert_eq!(b.get(4).unwrap().column_id, None);
    }

    #[test]
    fn test_slot_index_is_clamped() {
        let mut b = board();
        move_item(&mut b, 1, DropTarget::Slot(Some(2), -4)).unwrap();
        assert_eq!(b.lane_ids(Some(2)), &[1, 4, 5]);

        let mut b = board();
        move_item(&mut b, 1, DropTarget::Slot(Some(2), 40)).unwrap();
        assert_eq!(b.lane_ids(Some(2)), &[4, 5, 1]);

        let mut b = board();
        move_item(&mut b, 1, DropTarget::Slot(Some(1), 99)).unwrap();
        assert_eq!(b.lane_ids(Some(1)), &[2, 3, 1]);
    }

    #[test]
    fn test_unresolved_targets_leave_board_untouched() {
        let mut b = board();
        let before = b.clone();
        assert_eq!(move_item(&mut b, 42, DropTarget::before(1)), Err(ResolveError::UnknownItem(42)));
        assert_eq!(move_item(&mut b, 1, DropTarget::before(42)), Err(ResolveError::UnknownTarget(42)));
        assert_eq!(
            move_item(&mut b, 1, DropTarget::Column(Some(9))),
            Err(ResolveError::UnknownColumn(9))
        );
        assert_eq!(b, before);
    }

    #[test]
    fn test_positions_untouched_while_planning() {
        let mut b = board();
        move_item(&mut b, 3, DropTarget::before(1)).unwrap();
        assert_eq!(b.get(3).unwrap().position, 3);
        assert_eq!(b.get(1).unwrap().position, 1);
    }

    #[test]
    fn test_reorder_returns_input_on_noop() {
        let items = vec![card(2, Some(1), 1), card(1, None, 1)];
        let out = reorder(&columns(&[1]), items.clone(), 2, DropTarget::before(2));
        assert_eq!(out, items);
        let out = reorder(&columns(&[1]), items.clone(), 2, DropTarget::before(77));
        assert_eq!(out, items);
    }

    #[test]
    fn test_reorder_flat_collection() {
        let items = vec![card(1, Some(1), 1), card(2, Some(1), 2), card(3, Some(2), 1)];
        let out = reorder(&columns(&[1, 2]), items, 1, DropTarget::after(3));
        let ids: Vec<ItemId> = out.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
