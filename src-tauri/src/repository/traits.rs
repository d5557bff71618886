//! Repository Layer - Core Traits
//!
//! The CRUD contract shared by the column and item stores.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// CRUD over one table of the board database.
///
/// Ordering is not part of this contract: `create` appends at the end of
/// the entity's sequence and `update` never shifts siblings.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert and return the stored entity with its new id and position
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Every row, in display order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// `NotFound` when the id does not exist
    async fn update(&self, entity: &T) -> DomainResult<T>;

    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
