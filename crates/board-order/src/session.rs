//! Drag Session Controller
//!
//! Idle -> Dragging -> Idle. Hover events go straight to the planner so the
//! board reflects the pointer with no network round trip; release hands
//! the final placement to finalization. The session always ends Idle,
//! whatever happens to the writes afterwards.

use std::mem;

use tracing::{debug, warn};

use crate::board::Board;
use crate::finalize::{finalize, FinalizationPlan};
use crate::planner::{move_item, MoveOutcome};
use crate::types::{DropTarget, ItemId, Lane, Placeable};

/// The grasped item and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    pub item_id: ItemId,
    /// Committed lane at drag start
    pub origin: Lane,
    /// Index within `origin` at drag start
    pub origin_index: usize,
    /// Last target reported by the pointer
    pub hover: Option<DropTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Single-instance drag state machine
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_item(&self) -> Option<ItemId> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.item_id),
            DragState::Idle => None,
        }
    }

    /// Pointer down on a draggable item.
    ///
    /// Returns false when a drag is already running or the item is unknown.
    pub fn start<T: Placeable>(&mut self, board: &Board<T>, item_id: ItemId) -> bool {
        if let DragState::Dragging(drag) = self.state {
            debug!(active = drag.item_id, item_id, "drag already in progress");
            return false;
        }
        let Some((origin, origin_index)) = board.locate(item_id) else {
            warn!(item_id, "drag start on unknown item");
            return false;
        };
        self.state = DragState::Dragging(ActiveDrag {
            item_id,
            origin,
            origin_index,
            hover: None,
        });
        debug!(item_id, ?origin, "drag started");
        true
    }

    /// Pointer over a droppable target: reorder the board immediately
    pub fn hover<T: Placeable>(&mut self, board: &mut Board<T>, target: DropTarget) -> MoveOutcome {
        let DragState::Dragging(ref mut drag) = self.state else {
            return MoveOutcome::Unchanged;
        };
        drag.hover = Some(target);
        match move_item(board, drag.item_id, target) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(item_id = drag.item_id, %err, "hover target unresolved");
                MoveOutcome::Unchanged
            }
        }
    }

    /// Pointer up.
    ///
    /// `target` is `None` when released outside every drop target; the
    /// hover order stays on the board but nothing is persisted. Returns the
    /// writes to dispatch when the item ended somewhere new.
    pub fn release<T: Placeable>(
        &mut self,
        board: &mut Board<T>,
        target: Option<DropTarget>,
    ) -> Option<FinalizationPlan> {
        let DragState::Dragging(drag) = mem::take(&mut self.state) else {
            return None;
        };

        let Some(target) = target else {
            debug!(item_id = drag.item_id, "released outside any drop target");
            return None;
        };

        if let Err(err) = move_item(board, drag.item_id, target) {
            warn!(item_id = drag.item_id, %err, "drop target unresolved");
            return None;
        }

        let (lane, index) = board.locate(drag.item_id)?;
        if lane == drag.origin && index == drag.origin_index {
            debug!(item_id = drag.item_id, "dropped where it started");
            return None;
        }

        finalize(board, drag.item_id, drag.origin)
    }

    /// Escape or drag-cancel: forget the session without reverting hovers
    pub fn cancel(&mut self) -> Option<ActiveDrag> {
        match mem::take(&mut self.state) {
            DragState::Dragging(drag) => {
                debug!(item_id = drag.item_id, "drag cancelled");
                Some(drag)
            }
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{card, columns, Card};

    fn board() -> Board<Card> {
        Board::new(
            columns(&[1, 2, 3]),
            vec![card(1, Some(1), 1), card(2, Some(1), 2), card(3, Some(2), 1)],
        )
    }

    #[test]
    fn test_start_records_origin() {
        let b = board();
        let mut session = DragSession::new();
        assert!(session.start(&b, 2));
        assert_eq!(
            session.state(),
            DragState::Dragging(ActiveDrag { item_id: 2, origin: Some(1), origin_index: 1, hover: None })
        );
        assert!(!session.start(&b, 1));
        assert_eq!(session.active_item(), Some(2));
    }

    #[test]
    fn test_start_unknown_item_stays_idle() {
        let b = board();
        let mut session = DragSession::new();
        assert!(!session.start(&b, 9));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_hover_while_idle_does_nothing() {
        let mut b = board();
        let before = b.clone();
        let mut session = DragSession::new();
        assert!(session.hover(&mut b, DropTarget::Column(Some(2))).is_unchanged());
        assert_eq!(b, before);
    }

    #[test]
    fn test_release_outside_targets_keeps_hover_order() {
        let mut b = board();
        let mut session = DragSession::new();
        session.start(&b, 1);
        session.hover(&mut b, DropTarget::Column(Some(2)));
        assert!(session.release(&mut b, None).is_none());
        assert!(!session.is_dragging());
        assert_eq!(b.lane_ids(Some(2)), &[3, 1]);
    }

    #[test]
    fn test_cancel_does_not_revert() {
        let mut b = board();
        let mut session = DragSession::new();
        session.start(&b, 1);
        session.hover(&mut b, DropTarget::Column(Some(3)));
        let drag = session.cancel().unwrap();
        assert_eq!(drag.hover, Some(DropTarget::Column(Some(3))));
        assert_eq!(b.lane_ids(Some(3)), &[1]);
        assert!(session.cancel().is_none());
    }

    #[test]
    fn test_release_unresolved_target_ends_session() {
        let mut b = board();
        let mut session = DragSession::new();
        session.start(&b, 1);
        assert!(session.release(&mut b, Some(DropTarget::before(77))).is_none());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_release_finalizes_from_origin() {
        let mut b = board();
        let mut session = DragSession::new();
        session.start(&b, 1);
        session.hover(&mut b, DropTarget::Column(Some(3)));
        session.hover(&mut b, DropTarget::before(3));
        let plan = session.release(&mut b, Some(DropTarget::before(3))).unwrap();
        assert_eq!(plan.origin, Some(1));
        assert_eq!(plan.target, Some(2));
        assert_eq!(plan.index, 0);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_round_trip_back_to_start_issues_nothing() {
        let mut b = board();
        let before = b.clone();
        let mut session = DragSession::new();
        session.start(&b, 2);
        session.hover(&mut b, DropTarget::Column(Some(2)));
        session.hover(&mut b, DropTarget::after(1));
        assert!(session.release(&mut b, Some(DropTarget::after(1))).is_none());
        assert_eq!(b, before);
    }
}
