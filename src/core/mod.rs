//! Core module containing the record traits and the filter/sort/paginate engine

pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod query;
pub mod service;
pub mod sort;
pub mod store;
pub mod validation;

pub use entity::{Data, Entity};
pub use error::{ConfigError, EntityError, InventoryError, StorageError, ValidationError};
pub use field::{FieldFormat, FieldValue};
pub use filter::{FieldFilter, FilterSpec, NumericOperator, StatusFilter, filter_records};
pub use query::{ListQuery, Page, PaginationMeta, QueryParams, paginate, run_query};
pub use service::DataService;
pub use sort::{SortDirection, SortSpec, sort_records};
pub use store::QueryableStore;
