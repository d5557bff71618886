//! Domain Layer
//!
//! Contains all domain entities and core abstractions.

mod column;
mod entity;
mod item;

pub use column::Column;
pub use entity::{DomainError, DomainResult, Entity};
pub use item::Item;
