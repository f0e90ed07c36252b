//! Query parameters and pagination utilities

use crate::core::entity::Data;
use crate::core::filter::{FilterSpec, filter_records};
use crate::core::sort::{SortSpec, sort_records};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size used when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound for a requested page size when nothing else is configured
pub const MAX_PAGE_SIZE: usize = 100;

/// Query parameters for pagination, filtering and sorting
///
/// This is the loosely-typed form handed over by a table view or a URL query
/// string. Use [`QueryParams::to_list_query`] to get the typed form the
/// pipeline runs on.
///
/// # Example
/// ```rust,ignore
/// // page=2&limit=10
/// // filter={"status": "active", "stock>": 0, "name": "bolt"}
/// // sort=price:desc
/// let query = params.to_list_query(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
/// let page = run_query(&products, &query);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page; the table's configured size when absent
    pub limit: Option<usize>,

    /// Filters as a JSON object, see [`FilterSpec::from_json`]
    pub filter: Option<String>,

    /// Sort field and direction, see [`SortSpec::parse`]
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            filter: None,
            sort: None,
        }
    }
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, falling back to `default` and clamped to `1..=max`
    pub fn limit(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Parse filter JSON string into Value
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }

    /// Typed filter; unparseable JSON means no filter
    pub fn filter_spec(&self) -> FilterSpec {
        match self.filter_value() {
            Some(value) => FilterSpec::from_json(&value),
            None => {
                if self.filter.as_deref().is_some_and(|s| !s.trim().is_empty()) {
                    tracing::debug!(filter = ?self.filter, "filter is not valid JSON, ignoring");
                }
                FilterSpec::new()
            }
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort.as_deref().map(SortSpec::parse).unwrap_or_default()
    }

    /// Convert to the typed query. A missing limit means `default_page_size`;
    /// the page size is capped at `max_page_size`.
    pub fn to_list_query(&self, default_page_size: usize, max_page_size: usize) -> ListQuery {
        ListQuery {
            filter: self.filter_spec(),
            sort: self.sort_spec(),
            page: self.page(),
            page_size: self.limit(default_page_size, max_page_size),
        }
    }
}

/// Typed query run by the Filter → Sort → Paginate pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort: SortSpec,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: FilterSpec::new(),
            sort: SortSpec::none(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self.page = 1;
        self
    }
}

/// One page of records plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The records of this page
    pub items: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    /// True when the page holds no records (render "no records")
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation.
    ///
    /// `page` is reported as given, including 0 and pages past the end.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Bring `page` back into `[1, total_pages]` (page 1 when there are no pages)
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages.max(1))
    }
}

/// Slice one page out of `records`.
///
/// `page` is 1-based. Page 0 and pages past the end yield an empty slice;
/// the page number is reported as requested, never clamped.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Page<T> {
    let pagination = PaginationMeta::new(page, page_size, records.len());

    let items = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(pagination.limit);
            if start >= records.len() {
                Vec::new()
            } else {
                let end = start.saturating_add(pagination.limit).min(records.len());
                records[start..end].to_vec()
            }
        }
        None => Vec::new(),
    };

    Page { items, pagination }
}

/// Run Filter → Sort → Paginate over `records`
pub fn run_query<T: Data>(records: &[T], query: &ListQuery) -> Page<T> {
    let filtered = filter_records(records, &query.filter);
    let sorted = sort_records(&filtered, &query.sort);
    let page = paginate(&sorted, query.page, query.page_size);

    tracing::debug!(
        resource = T::resource_name(),
        page = page.pagination.page,
        total = page.pagination.total,
        total_pages = page.pagination.total_pages,
        returned = page.items.len(),
        "query executed"
    );

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params = QueryParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 20);
        assert_eq!(params.limit(5, MAX_PAGE_SIZE), 5);
        assert!(params.filter_spec().is_empty());
        assert_eq!(params.sort_spec(), SortSpec::none());
    }

    #[test]
    fn test_query_params_clamping() {
        let params = QueryParams {
            page: 0,
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(20, 100), 100);
        assert_eq!(params.limit(20, 0), 1);

        let params = QueryParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(20, 100), 1);
    }

    #[test]
    fn test_query_params_to_list_query() {
        let params: QueryParams = serde_json::from_value(serde_json::json!({
            "page": 3,
            "limit": 5,
            "filter": "{\"stock>\": 0}",
            "sort": "price:desc"
        }))
        .unwrap();

        let query = params.to_list_query(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 5);
        assert_eq!(query.filter.active_len(), 1);
        assert_eq!(query.sort, SortSpec::desc("price"));
    }

    #[test]
    fn test_invalid_filter_json_is_ignored() {
        let params = QueryParams {
            filter: Some("{not json".to_string()),
            ..Default::default()
        };
        assert!(params.filter_spec().is_empty());
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert_eq!(meta.clamp_page(4), 1);
    }

    #[test]
    fn test_paginate_slices() {
        let data: Vec<u32> = (1..=25).collect();

        let page = paginate(&data, 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let data: Vec<u32> = (1..=25).collect();
        let page = paginate(&data, 4, 10);
        assert!(page.is_empty());
        assert_eq!(page.pagination.page, 4);
        assert_eq!(page.pagination.clamp_page(4), 3);

        let page = paginate(&data, usize::MAX, 10);
        assert!(page.is_empty());
    }

    #[test]
    fn test_paginate_page_zero_is_empty() {
        let data = vec![1, 2, 3, 4, 5];
        let page = paginate(&data, 0, 2);
        assert!(page.is_empty());
        assert_eq!(page.pagination.page, 0);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(!page.pagination.has_prev);
        assert_eq!(page.pagination.clamp_page(0), 1);
    }

    #[test]
    fn test_paginate_zero_page_size() {
        let data = vec!['a', 'b'];
        let page = paginate(&data, 1, 0);
        assert_eq!(page.items, vec!['a']);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_list_query_resets_page() {
        let query = ListQuery::default().with_page(4).with_sort(SortSpec::asc("name"));
        assert_eq!(query.page, 1);
        let query = query.with_page(2).with_filter(FilterSpec::new());
        assert_eq!(query.page, 1);
    }
}
