//! Engine Errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ColumnId, ItemId};

/// A drop target that cannot be mapped onto the current board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("item {0} is not on the board")]
    UnknownItem(ItemId),
    #[error("drop target item {0} is not on the board")]
    UnknownTarget(ItemId),
    #[error("column {0} does not exist")]
    UnknownColumn(ColumnId),
}

/// Failure of a single persistence write
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PersistError {
    #[error("item {0} not found in store")]
    NotFound(ItemId),
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}
