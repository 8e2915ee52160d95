//! Repository Trait
//!
//! CRUD contract shared by the category, item and user score stores.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Keyed storage for one entity type.
///
/// `update` and `delete` answer `NotFound` when no row matched, except where
/// an implementation documents otherwise.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert; the entity carries its own id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Everything, in the store's display order
    async fn list(&self) -> DomainResult<Vec<T>>;

    async fn update(&self, entity: &T) -> DomainResult<T>;

    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
