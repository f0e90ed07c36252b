//! # Stockroom
//!
//! Typed record engine for inventory, catalog and invoicing views.
//!
//! ## Features
//!
//! - **Filter**: per-field predicates (text, numeric operators, ranges, status)
//!   combined with AND; malformed input disables a predicate instead of failing
//! - **Sort**: stable, type-aware ordering by one field in either direction
//! - **Paginate**: 1-based pages with total/page metadata
//! - **Invoice calculator**: per-line subtotal, discount, tax and total, plus
//!   invoice-level aggregation
//! - **Repository**: `DataService` trait with an insertion-ordered in-memory
//!   implementation
//!
//! The engine functions are pure and synchronous. They take records by
//! reference and return new collections, so they are safe to call from any
//! number of threads.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockroom::prelude::*;
//!
//! let query = ListQuery::default()
//!     .with_filter(
//!         FilterSpec::new()
//!             .with("name", FieldFilter::text("bolt"))
//!             .with("stock", FieldFilter::between(10, 15)),
//!     )
//!     .with_sort(SortSpec::desc("price"));
//!
//! let page = run_query(&products, &query);
//! println!("{} of {} products", page.items.len(), page.pagination.total);
//!
//! let line = LineItemInput::new(100.0, 2.0, 10.0, 19.0).validate()?;
//! assert_eq!(line.subtotal, 200.0);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod invoice;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Data, Entity},
        field::{FieldFormat, FieldValue},
        service::DataService,
        store::QueryableStore,
    };

    // === Engine ===
    pub use crate::core::{
        filter::{FieldFilter, FilterSpec, NumericOperator, StatusFilter, filter_records},
        query::{ListQuery, Page, PaginationMeta, QueryParams, paginate, run_query},
        sort::{SortDirection, SortSpec, sort_records},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, EntityError, FieldValidationError, InventoryError, StorageError,
        ValidationError,
    };

    // === Macros ===
    pub use crate::impl_data_entity;

    // === Entities ===
    pub use crate::entities::{
        Category, CustomField, Movement, MovementKind, Product, Provider, Warehouse,
    };

    // === Invoices ===
    pub use crate::invoice::{
        Invoice, InvoiceKind, InvoiceLineItem, InvoiceTotals, LineEdit, LineItemInput, aggregate,
    };

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{EngineConfig, PaginationConfig, TableConfig, init_tracing};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
