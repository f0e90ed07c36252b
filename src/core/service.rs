//! Repository trait for catalog entities

use crate::core::Data;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for one catalog entity type
///
/// This is the boundary between the pure engine and whatever supplies the
/// records (mock arrays, a REST backend, a database). The engine only ever
/// reads what `list` returns.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities
    async fn list(&self) -> Result<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete an entity
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Search entities whose `field` equals `value`
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;
}
