//! Macro-generated test suite for `DataService<Product>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates any
//! `DataService<Product>` implementation against the full contract: CRUD,
//! search across field types, ordering and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use stockroom::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<Product>::new());
//! ```

/// Generate a full `DataService<Product>` conformance test suite.
///
/// `$factory` must evaluate to a fresh service for each test. For the
/// concurrent access test the service must also be `Clone + 'static`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use stockroom::core::entity::{Data, Entity};
            use stockroom::core::error::EntityError;
            use stockroom::core::service::DataService;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let entity = product("Hex bolt M8", "BOLT-M8", 0.35, 1200, "active");
                let id = entity.id;

                let created = service.create(entity).await.unwrap();
                assert_eq!(created.id(), id);
                assert_eq!(created.entity_type(), "product");

                let retrieved = service.get(&id).await.unwrap().unwrap();
                assert_eq!(retrieved.name(), "Hex bolt M8");
                assert_eq!(retrieved.sku, "BOLT-M8");
                assert_eq!(retrieved.stock, 1200);
                assert!((retrieved.price - 0.35).abs() < f64::EPSILON);
                assert!(retrieved.is_active());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                assert!(service.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_multiple_in_insertion_order() {
                let service = $factory;
                let catalog = sample_catalog();
                for p in catalog.clone() {
                    service.create(p).await.unwrap();
                }

                let all = service.list().await.unwrap();
                assert_eq!(ids(&all), ids(&catalog));
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let mut entity = product("Drill", "DRL", 89.9, 10, "active");
                let id = entity.id;
                service.create(entity.clone()).await.unwrap();

                entity.stock = 7;
                entity.set_status("inactive");
                let updated = service.update(&id, entity).await.unwrap();
                assert_eq!(updated.stock, 7);

                let retrieved = service.get(&id).await.unwrap().unwrap();
                assert_eq!(retrieved.stock, 7);
                assert!(!retrieved.is_active());
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let entity = product("Ghost", "GHOST", 1.0, 0, "active");
                let err = service.update(&entity.id, entity.clone()).await.unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<EntityError>(),
                    Some(EntityError::NotFound { .. })
                ));
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let entity = product("Tape", "TAPE", 7.8, 10, "active");
                let id = entity.id;
                service.create(entity).await.unwrap();

                service.delete(&id).await.unwrap();
                assert!(service.get(&id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                assert!(service.delete(&Uuid::new_v4()).await.is_err());
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_string_field() {
                let service = $factory;
                for p in sample_catalog() {
                    service.create(p).await.unwrap();
                }

                let found = service.search("sku", "DRL-650").await.unwrap();
                assert_eq!(names(&found), vec!["Drill 650W"]);
            }

            #[tokio::test]
            async fn test_search_integer_field() {
                let service = $factory;
                for p in sample_catalog() {
                    service.create(p).await.unwrap();
                }

                let found = service.search("stock", "15").await.unwrap();
                assert_eq!(names(&found), vec!["hex nut M8", "Safety gloves"]);
            }

            #[tokio::test]
            async fn test_search_float_field() {
                let service = $factory;
                for p in sample_catalog() {
                    service.create(p).await.unwrap();
                }

                let found = service.search("price", "89.9").await.unwrap();
                assert_eq!(names(&found), vec!["Drill 650W", "Angle grinder"]);
            }

            #[tokio::test]
            async fn test_search_uuid_field() {
                let service = $factory;
                let category = Uuid::new_v4();
                service.create(product_in(category, "Drill", 10.0, 1)).await.unwrap();
                service.create(product("Nut", "NUT", 0.1, 1, "active")).await.unwrap();

                let found = service
                    .search("category_id", &category.to_string())
                    .await
                    .unwrap();
                assert_eq!(names(&found), vec!["Drill"]);
            }

            #[tokio::test]
            async fn test_search_no_results_and_unknown_field() {
                let service = $factory;
                for p in sample_catalog() {
                    service.create(p).await.unwrap();
                }

                assert!(service.search("sku", "NOPE").await.unwrap().is_empty());
                assert!(service.search("colour", "red").await.unwrap().is_empty());
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let entity = product("Drill", "DRL", 10.0, 1, "active");
                service.create(entity.clone()).await.unwrap();

                let err = service.create(entity).await.unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<EntityError>(),
                    Some(EntityError::AlreadyExists { .. })
                ));
                assert_eq!(service.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;

                let handles: Vec<_> = (0..10)
                    .map(|i| {
                        let service = service.clone();
                        tokio::spawn(async move {
                            let p = product(&format!("Item {}", i), "SKU", 1.0, i, "active");
                            service.create(p).await.unwrap();
                        })
                    })
                    .collect();

                for result in futures::future::join_all(handles).await {
                    result.unwrap();
                }

                assert_eq!(service.list().await.unwrap().len(), 10);
            }
        }
    };
}
