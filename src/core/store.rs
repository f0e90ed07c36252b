//! Store traits for filtering and sorting

use crate::core::entity::Data;
use crate::core::filter::{FilterSpec, filter_records};
use crate::core::query::{ListQuery, Page, paginate};
use crate::core::sort::{SortSpec, sort_records};

/// Trait for stores that support filtering, sorting and paging
///
/// Only `list_all` is required: the provided methods run the generic engine
/// over the store's records. Stores that can push a predicate down to their
/// backend override `apply_filters` / `apply_sort`.
pub trait QueryableStore<T: Data>: Send + Sync {
    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Apply filters to a collection of entities
    fn apply_filters(&self, data: Vec<T>, filter: &FilterSpec) -> Vec<T> {
        filter_records(&data, filter)
    }

    /// Apply sorting to a collection of entities
    fn apply_sort(&self, data: Vec<T>, sort: &SortSpec) -> Vec<T> {
        sort_records(&data, sort)
    }

    /// Run the whole Filter → Sort → Paginate pipeline
    fn query(&self, query: &ListQuery) -> Page<T> {
        let data = self.apply_filters(self.list_all(), &query.filter);
        let data = self.apply_sort(data, &query.sort);
        paginate(&data, query.page, query.page_size)
    }
}
