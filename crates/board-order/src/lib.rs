//! Board Ordering Engine
//!
//! Keeps a dense, per-column order of work items while they are dragged
//! around a board, and turns each drop into a set of independent position
//! writes.
//!
//! - allocator: dense 1-based positions
//! - board: item arena with one ordered id list per lane
//! - planner: applies a drop target to the board (hover and drop)
//! - session: Idle/Dragging state machine driven by pointer events
//! - finalize: authoritative positions and the writes to persist them
//! - dispatch: concurrent, failure-isolated persistence of those writes

mod allocator;
mod board;
mod dispatch;
mod error;
mod finalize;
mod planner;
mod session;
mod types;

#[cfg(test)]
mod testing;

pub use allocator::{allocate, assign, dense_position, is_dense, Reassignment};
pub use board::Board;
pub use dispatch::{dispatch, dispatch_with, DispatchReport, ItemPersistence};
pub use error::{PersistError, ResolveError};
pub use finalize::{finalize, FinalizationPlan, PositionPatch, PositionWrite};
pub use planner::{move_item, reorder, MoveOutcome};
pub use session::{ActiveDrag, DragSession, DragState};
pub use types::{Column, ColumnId, DropTarget, Edge, ItemId, Lane, Placeable};

/// Re-exported so implementors of [`ItemPersistence`] use the same macro
pub use async_trait::async_trait;
