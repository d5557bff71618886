//! Board Collection
//!
//! Items are kept in an arena keyed by id, with one ordered id list per
//! lane. Moves become remove-from-list / insert-into-list, so no index
//! arithmetic ever spans two columns.
//!
//! Each item's own `column_id`/`position` is what the board displays. The
//! last lane and position known to be stored are tracked separately, and
//! only move forward when a write is confirmed.

use std::collections::HashMap;

use tracing::warn;

use crate::allocator::{assign, Reassignment};
use crate::finalize::PositionWrite;
use crate::types::{Column, ItemId, Lane, Placeable};

#[derive(Debug, Clone, PartialEq)]
struct LaneOrder {
    lane: Lane,
    ids: Vec<ItemId>,
}

/// The full item collection of a board, grouped by lane
#[derive(Debug, Clone, PartialEq)]
pub struct Board<T> {
    columns: Vec<Column>,
    items: HashMap<ItemId, T>,
    lanes: Vec<LaneOrder>,
    /// Last confirmed `(lane, position)` per item
    committed: HashMap<ItemId, (Lane, i32)>,
}

/// An empty board with no columns, only the unplaced lane
impl<T> Default for Board<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            items: HashMap::new(),
            lanes: vec![LaneOrder { lane: None, ids: Vec::new() }],
            committed: HashMap::new(),
        }
    }
}

impl<T: Placeable> Board<T> {
    /// Build a board keeping the given order within each lane.
    ///
    /// Use this for collections whose array order is already the visual
    /// order. Every item's fields are taken as its committed placement.
    pub fn new(columns: Vec<Column>, items: impl IntoIterator<Item = T>) -> Self {
        let mut columns = columns;
        columns.sort_by_key(|c| (c.position, c.id));

        let mut lanes = Vec::with_capacity(columns.len() + 1);
        lanes.push(LaneOrder { lane: None, ids: Vec::new() });
        lanes.extend(columns.iter().map(|c| LaneOrder {
            lane: Some(c.id),
            ids: Vec::new(),
        }));

        let mut board = Self {
            columns,
            items: HashMap::new(),
            lanes,
            committed: HashMap::new(),
        };
        for item in items {
            if board.items.contains_key(&item.id()) {
                warn!(item_id = item.id(), "duplicate item id ignored");
                continue;
            }
            board.push(item);
        }
        board
    }

    /// Build a board from store data, ordering each lane by `(position, id)`
    pub fn from_persisted(columns: Vec<Column>, items: impl IntoIterator<Item = T>) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_by_key(|i| (i.position(), i.id()));
        Self::new(columns, items)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Add a column lane, keeping lanes in column order
    pub fn add_column(&mut self, column: Column) {
        if self.columns.iter().any(|c| c.id == column.id) {
            return;
        }
        self.columns.push(column);
        self.columns.sort_by_key(|c| (c.position, c.id));

        let mut lanes = std::mem::take(&mut self.lanes);
        let mut ordered = Vec::with_capacity(lanes.len() + 1);
        let unplaced = std::iter::once(None).chain(self.columns.iter().map(|c| Some(c.id)));
        for lane in unplaced {
            let ids = match lanes.iter().position(|l| l.lane == lane) {
                Some(index) => lanes.remove(index).ids,
                None => Vec::new(),
            };
            ordered.push(LaneOrder { lane, ids });
        }
        // Lanes of unknown columns stay at the end
        ordered.extend(lanes);
        self.lanes = ordered;
    }

    /// Append a stored item to the end of its lane
    pub fn push(&mut self, item: T) {
        let id = item.id();
        if self.contains(id) {
            self.remove(id);
        }
        let lane = item.column_id();
        self.committed.insert(id, (lane, item.position()));
        self.items.insert(id, item);
        self.lane_order_mut(lane).ids.push(id);
    }

    /// Swap in a fresh stored copy of an item without moving it.
    ///
    /// The displayed lane and position are kept; the copy's own placement
    /// becomes the committed one. Returns false for unknown ids.
    pub fn replace(&mut self, mut item: T) -> bool {
        let id = item.id();
        let Some(current) = self.items.get(&id) else {
            return false;
        };
        self.committed.insert(id, (item.column_id(), item.position()));
        item.set_column_id(current.column_id());
        item.set_position(current.position());
        self.items.insert(id, item);
        true
    }

    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        self.take_from_lane(id)?;
        self.committed.remove(&id);
        self.items.remove(&id)
    }

    /// Last placement of an item known to be stored
    pub fn committed(&self, id: ItemId) -> Option<(Lane, i32)> {
        self.committed.get(&id).copied()
    }

    /// Record a write the store accepted
    pub fn confirm(&mut self, write: &PositionWrite) {
        if let Some(entry) = self.committed.get_mut(&write.item_id) {
            if let Some(lane) = write.patch.column_id() {
                entry.0 = lane;
            }
            entry.1 = write.patch.position();
        }
    }

    /// Whether a drop on `lane` can be honoured
    pub fn is_known_lane(&self, lane: Lane) -> bool {
        match lane {
            None => true,
            Some(column_id) => self.columns.iter().any(|c| c.id == column_id),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(&id)
    }

    /// Ordered ids of one lane (empty when the lane has no items)
    pub fn lane_ids(&self, lane: Lane) -> &[ItemId] {
        self.lanes
            .iter()
            .find(|l| l.lane == lane)
            .map(|l| l.ids.as_slice())
            .unwrap_or(&[])
    }

    /// Items of one lane in display order
    pub fn lane(&self, lane: Lane) -> impl Iterator<Item = &T> + '_ {
        self.lane_ids(lane).iter().filter_map(move |id| self.items.get(id))
    }

    /// Every lane with its ordered ids: unplaced first, then columns
    pub fn lanes(&self) -> impl Iterator<Item = (Lane, &[ItemId])> + '_ {
        self.lanes.iter().map(|l| (l.lane, l.ids.as_slice()))
    }

    /// Lane and index of an item
    pub fn locate(&self, id: ItemId) -> Option<(Lane, usize)> {
        self.lanes
            .iter()
            .find_map(|l| l.ids.iter().position(|&i| i == id).map(|index| (l.lane, index)))
    }

    /// All items, lane by lane
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.lanes
            .iter()
            .flat_map(|l| l.ids.iter())
            .filter_map(move |id| self.items.get(id))
    }

    pub fn to_items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn into_items(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        for lane in &self.lanes {
            for id in &lane.ids {
                if let Some(item) = self.items.remove(id) {
                    out.push(item);
                }
            }
        }
        out
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Detach an id from its lane list; the item stays in the arena
    pub(crate) fn take_from_lane(&mut self, id: ItemId) -> Option<(Lane, usize)> {
        let (lane, index) = self.locate(id)?;
        self.lane_order_mut(lane).ids.remove(index);
        Some((lane, index))
    }

    /// Insert an id into a lane list, clamping `index` to `[0, len]`
    pub(crate) fn insert_into_lane(&mut self, lane: Lane, index: usize, id: ItemId) -> usize {
        let ids = &mut self.lane_order_mut(lane).ids;
        let index = index.min(ids.len());
        ids.insert(index, id);
        index
    }

    /// Rewrite the positions of one lane to 1..=N in list order
    pub(crate) fn reallocate_lane(&mut self, lane: Lane) -> Vec<Reassignment> {
        let ids = self.lane_ids(lane).to_vec();
        ids.iter()
            .enumerate()
            .filter_map(|(rank, id)| self.items.get_mut(id).map(|item| assign(item, rank)))
            .collect()
    }

    fn lane_order_mut(&mut self, lane: Lane) -> &mut LaneOrder {
        let index = match self.lanes.iter().position(|l| l.lane == lane) {
            Some(index) => index,
            None => {
                self.lanes.push(LaneOrder { lane, ids: Vec::new() });
                self.lanes.len() - 1
            }
        };
        &mut self.lanes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{card, columns, Card};

    #[test]
    fn test_new_keeps_array_order_within_lane() {
        let board = Board::new(
            columns(&[1, 2]),
            vec![card(3, Some(1), 9), card(1, Some(1), 1), card(2, Some(2), 1)],
        );
        assert_eq!(board.lane_ids(Some(1)), &[3, 1]);
        assert_eq!(board.lane_ids(Some(2)), &[2]);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_from_persisted_sorts_by_position() {
        let board = Board::from_persisted(
            columns(&[1]),
            vec![card(3, Some(1), 2), card(1, Some(1), 3), card(2, Some(1), 1)],
        );
        assert_eq!(board.lane_ids(Some(1)), &[2, 3, 1]);
    }

    #[test]
    fn test_from_persisted_breaks_ties_by_id() {
        let board = Board::from_persisted(columns(&[1]), vec![card(5, Some(1), 1), card(4, Some(1), 1)]);
        assert_eq!(board.lane_ids(Some(1)), &[4, 5]);
    }

    #[test]
    fn test_lanes_follow_column_position() {
        let cols = vec![Column::new(7, "Done", 2), Column::new(8, "Todo", 1)];
        let board: Board<Card> = Board::new(cols, Vec::new());
        let order: Vec<Lane> = board.lanes().map(|(lane, _)| lane).collect();
        assert_eq!(order, vec![None, Some(8), Some(7)]);
    }

    #[test]
    fn test_unknown_column_keeps_its_items() {
        let board = Board::new(columns(&[1]), vec![card(1, Some(99), 1)]);
        assert_eq!(board.lane_ids(Some(99)), &[1]);
        assert!(!board.is_known_lane(Some(99)));
        assert!(board.is_known_lane(None));
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let board = Board::new(columns(&[1]), vec![card(1, Some(1), 1), card(1, Some(1), 2)]);
        assert_eq!(board.len(), 1);
        assert_eq!(board.lane_ids(Some(1)), &[1]);
    }

    #[test]
    fn test_locate_and_into_items() {
        let board = Board::new(
            columns(&[1, 2]),
            vec![card(1, Some(2), 1), card(2, None, 1), card(3, Some(1), 1)],
        );
        assert_eq!(board.locate(1), Some((Some(2), 0)));
        assert_eq!(board.locate(42), None);
        let ids: Vec<ItemId> = board.into_items().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_insert_into_lane_clamps_index() {
        let mut board = Board::new(columns(&[1]), vec![card(1, Some(1), 1), card(2, Some(1), 2)]);
        board.take_from_lane(2);
        assert_eq!(board.insert_into_lane(Some(1), 40, 2), 1);
        assert_eq!(board.lane_ids(Some(1)), &[1, 2]);
    }

    #[test]
    fn test_add_column_slots_lane_by_position() {
        let mut board = Board::new(
            vec![Column::new(1, "Todo", 1), Column::new(3, "Done", 3)],
            vec![card(1, Some(1), 1), card(2, Some(3), 1)],
        );
        board.add_column(Column::new(2, "Doing", 2));
        let order: Vec<Lane> = board.lanes().map(|(lane, _)| lane).collect();
        assert_eq!(order, vec![None, Some(1), Some(2), Some(3)]);
        assert_eq!(board.lane_ids(Some(3)), &[2]);
        assert!(board.is_known_lane(Some(2)));
    }

    #[test]
    fn test_push_and_remove() {
        let mut board = Board::new(columns(&[1]), vec![card(1, Some(1), 1)]);
        board.push(card(2, Some(1), 2));
        assert_eq!(board.lane_ids(Some(1)), &[1, 2]);
        assert_eq!(board.committed(2), Some((Some(1), 2)));

        assert_eq!(board.remove(1).map(|c| c.id), Some(1));
        assert_eq!(board.lane_ids(Some(1)), &[2]);
        assert_eq!(board.committed(1), None);
        assert!(board.remove(1).is_none());
    }

    #[test]
    fn test_replace_keeps_displayed_placement() {
        let mut board = Board::new(columns(&[1, 2]), vec![card(1, Some(2), 1), card(2, Some(2), 2)]);
        let mut stored = card(2, Some(1), 5);
        stored.title = "renamed".to_string();
        assert!(board.replace(stored));

        let shown = board.get(2).unwrap();
        assert_eq!(shown.title, "renamed");
        assert_eq!((shown.column_id, shown.position), (Some(2), 2));
        assert_eq!(board.lane_ids(Some(2)), &[1, 2]);
        assert_eq!(board.committed(2), Some((Some(1), 5)));
        assert!(!board.replace(card(9, None, 1)));
    }

    #[test]
    fn test_confirm_moves_committed_placement() {
        use crate::finalize::PositionPatch;

        let mut board = Board::new(columns(&[1, 2]), vec![card(1, Some(1), 3)]);
        board.confirm(&PositionWrite { item_id: 1, patch: PositionPatch::Reorder { position: 1 } });
        assert_eq!(board.committed(1), Some((Some(1), 1)));
        board.confirm(&PositionWrite {
            item_id: 1,
            patch: PositionPatch::Relocate { column_id: Some(2), position: 4 },
        });
        assert_eq!(board.committed(1), Some((Some(2), 4)));
        // Display fields are not touched
        assert_eq!(board.get(1).unwrap().position, 3);
    }

    #[test]
    fn test_default_board_has_only_unplaced_lane() {
        let board: Board<Card> = Board::default();
        assert!(board.is_empty());
        assert!(board.is_known_lane(None));
        assert!(!board.is_known_lane(Some(1)));
        assert_eq!(board.lanes().count(), 1);
    }
}
