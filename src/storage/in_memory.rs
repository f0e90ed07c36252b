//! In-memory implementation of DataService for testing and development

use crate::core::error::{EntityError, StorageError};
use crate::core::store::QueryableStore;
use crate::core::{Data, DataService};
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory repository for one entity type
///
/// Records are kept in insertion order, so `list` is deterministic and the
/// "no sort selected" view shows records the way they were added. Clones
/// share the same underlying map.
#[derive(Clone)]
pub struct InMemoryDataService<T: Data> {
    data: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Data> InMemoryDataService<T> {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a repository pre-filled with `records` (mock data)
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let data: IndexMap<Uuid, T> = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<Uuid, T>>, StorageError> {
        self.data.read().map_err(|e| StorageError::LockPoisoned {
            kind: "read",
            message: e.to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<Uuid, T>>, StorageError> {
        self.data.write().map_err(|e| StorageError::LockPoisoned {
            kind: "write",
            message: e.to_string(),
        })
    }

    fn not_found(id: &Uuid) -> EntityError {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id: *id,
        }
    }
}

impl<T: Data> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut data = self.write()?;

        let id = entity.id();
        if data.contains_key(&id) {
            return Err(EntityError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id,
            }
            .into());
        }
        data.insert(id, entity.clone());

        tracing::debug!(resource = T::resource_name(), id = %id, "entity created");
        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut data = self.write()?;

        let slot = data.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        *slot = entity.clone();

        tracing::debug!(resource = T::resource_name(), id = %id, "entity updated");
        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut data = self.write()?;

        data.shift_remove(id).ok_or_else(|| Self::not_found(id))?;

        tracing::debug!(resource = T::resource_name(), id = %id, "entity deleted");
        Ok(())
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let data = self.read()?;

        Ok(data
            .values()
            .filter(|entity| {
                entity
                    .field_value(field)
                    .is_some_and(|v| v.matches_text(value))
            })
            .cloned()
            .collect())
    }
}

impl<T: Data> QueryableStore<T> for InMemoryDataService<T> {
    fn list_all(&self) -> Vec<T> {
        match self.data.read() {
            Ok(data) => data.values().cloned().collect(),
            Err(poisoned) => {
                tracing::warn!(resource = T::resource_name(), "lock poisoned, reading anyway");
                poisoned.into_inner().values().cloned().collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::ListQuery;
    use crate::core::sort::SortSpec;
    use crate::entities::Warehouse;

    fn warehouse(name: &str, capacity: i64) -> Warehouse {
        Warehouse::new(
            name.to_string(),
            "active".to_string(),
            format!("WH-{}", name.len()),
            "Medellín".to_string(),
            capacity,
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = InMemoryDataService::new();
        let w = warehouse("North", 100);

        service.create(w.clone()).await.unwrap();
        let found = service.get(&w.id).await.unwrap();
        assert_eq!(found, Some(w));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let service = InMemoryDataService::new();
        let w = warehouse("North", 100);

        service.create(w.clone()).await.unwrap();
        let err = service.create(w).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntityError>(),
            Some(EntityError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let service = InMemoryDataService::new();
        for name in ["c", "a", "b"] {
            service.create(warehouse(name, 1)).await.unwrap();
        }
        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let service: InMemoryDataService<Warehouse> = InMemoryDataService::new();
        let w = warehouse("North", 100);

        let err = service.update(&w.id, w.clone()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntityError>(),
            Some(EntityError::NotFound { .. })
        ));
        assert!(service.delete(&w.id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_preserves_order() {
        let a = warehouse("a", 1);
        let b = warehouse("b", 2);
        let c = warehouse("c", 3);
        let service = InMemoryDataService::with_records([a.clone(), b.clone(), c.clone()]);

        service.delete(&b.id).await.unwrap();
        let ids: Vec<Uuid> = service.list().await.unwrap().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn test_search() {
        let service = InMemoryDataService::with_records([warehouse("North", 100), warehouse("South", 250)]);

        let found = service.search("capacity", "250").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "South");

        assert!(service.search("capacity", "nope").await.unwrap().is_empty());
        assert!(service.search("unknown", "250").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_poisoned_lock() {
        let service = InMemoryDataService::with_records([warehouse("North", 100)]);

        let data = Arc::clone(&service.data);
        let _ = std::thread::spawn(move || {
            let _guard = data.write().unwrap();
            panic!("writer crashed");
        })
        .join();

        let err = service.list().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::LockPoisoned { kind: "read", .. })
        ));
        // the sync query path still serves the data
        assert_eq!(service.list_all().len(), 1);
    }

    #[test]
    fn test_queryable_store() {
        let service = InMemoryDataService::with_records([
            warehouse("North", 100),
            warehouse("South", 250),
            warehouse("East", 50),
        ]);
        assert_eq!(service.len(), 3);

        let page = service.query(
            &ListQuery::default()
                .with_sort(SortSpec::desc("capacity"))
                .with_page_size(2),
        );
        let names: Vec<&str> = page.items.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["South", "North"]);
        assert_eq!(page.pagination.total_pages, 2);
    }
}
