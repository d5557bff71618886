//! Repository Layer
//!
//! Data access abstractions and implementations.

mod column_repo;
mod db;
mod item;
mod traits;


pub use column_repo::ColumnRepository;
pub use db::{init_db, DbState, SharedConnection};
pub use item::{ItemPositioningOperations, ItemRepository};
pub use traits::Repository;
