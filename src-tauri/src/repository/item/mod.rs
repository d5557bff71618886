//! Item Repository Module
//!
//! Item repository functionality split into specialized sub-modules:
//! - item_repo: Core CRUD operations
//! - item_positioning: Position management and the persistence write

mod item_positioning;
mod item_repo;

pub use item_repo::ItemRepository;

// Re-export the operation trait so it can be used by importing ItemRepository
pub use item_positioning::ItemPositioningOperations;
