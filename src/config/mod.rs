//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::query::{DEFAULT_PAGE_SIZE, ListQuery, MAX_PAGE_SIZE, QueryParams};
use crate::core::sort::SortSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Page size settings shared by all tables
///
/// Unset fields resolve to the built-in defaults and are left alone when
/// configurations are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_page_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<usize>,
}

impl PaginationConfig {
    /// Upper bound for any page size
    pub fn max_page_size(&self) -> usize {
        self.max_page_size.unwrap_or(MAX_PAGE_SIZE)
    }

    /// Page size for tables without their own setting
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
            .unwrap_or_else(|| DEFAULT_PAGE_SIZE.min(self.max_page_size()))
    }

    /// Overlay the fields `other` sets explicitly
    fn merge(&mut self, other: Self) {
        if other.default_page_size.is_some() {
            self.default_page_size = other.default_page_size;
        }
        if other.max_page_size.is_some() {
            self.max_page_size = other.max_page_size;
        }
    }
}

/// Per-table overrides, keyed by resource name (e.g. "products")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Sort applied when the view has none selected, in `field:dir` form
    #[serde(default)]
    pub default_sort: Option<String>,

    /// Page size for this table
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub tables: IndexMap<String, TableConfig>,

    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        let config = Self::parse(&content, Some(path.display().to_string()))?;
        tracing::info!(path = %path.display(), tables = config.tables.len(), "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<String>) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check page sizes are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.pagination.max_page_size();
        if max == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.max_page_size".to_string(),
                value: max.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let out_of_range = |size: usize| size == 0 || size > max;
        if let Some(size) = self.pagination.default_page_size.filter(|s| out_of_range(*s)) {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_page_size".to_string(),
                value: size.to_string(),
                message: format!("must be between 1 and {}", max),
            });
        }
        for (name, table) in &self.tables {
            if let Some(size) = table.page_size.filter(|s| out_of_range(*s)) {
                return Err(ConfigError::InvalidValue {
                    field: format!("tables.{}.page_size", name),
                    value: size.to_string(),
                    message: format!("must be between 1 and {}", max),
                });
            }
        }
        Ok(())
    }

    /// Merge several configurations; later ones win for the settings they set
    /// explicitly and for tables with the same name
    pub fn merge(configs: Vec<Self>) -> Self {
        let mut merged = Self::default();
        for config in configs {
            merged.pagination.merge(config.pagination);
            if config.log_filter.is_some() {
                merged.log_filter = config.log_filter;
            }
            for (name, table) in config.tables {
                merged.tables.insert(name, table);
            }
        }
        merged
    }

    pub fn table(&self, resource: &str) -> Option<&TableConfig> {
        self.tables.get(resource)
    }

    /// Page size for a table, falling back to the global default and capped
    /// at the maximum
    pub fn page_size_for(&self, resource: &str) -> usize {
        self.table(resource)
            .and_then(|t| t.page_size)
            .unwrap_or_else(|| self.pagination.default_page_size())
            .clamp(1, self.pagination.max_page_size().max(1))
    }

    pub fn default_sort_for(&self, resource: &str) -> SortSpec {
        self.table(resource)
            .and_then(|t| t.default_sort.as_deref())
            .map(SortSpec::parse)
            .unwrap_or_default()
    }

    /// Fresh query for a table view: page 1, configured page size and sort
    pub fn initial_query(&self, resource: &str) -> ListQuery {
        ListQuery {
            sort: self.default_sort_for(resource),
            page_size: self.page_size_for(resource),
            ..ListQuery::default()
        }
    }

    /// Typed query from raw parameters. A missing limit or sort falls back to
    /// the table's configured page size and default sort; the page size is
    /// capped at the configured maximum.
    pub fn list_query_for(&self, resource: &str, params: &QueryParams) -> ListQuery {
        let mut query =
            params.to_list_query(self.page_size_for(resource), self.pagination.max_page_size());
        if query.sort.field.is_none() {
            query.sort = self.default_sort_for(resource);
        }
        query
    }

    /// Create a default configuration for the built-in catalog tables
    pub fn default_config() -> Self {
        let mut tables = IndexMap::new();
        for (resource, sort) in [
            ("products", "name:asc"),
            ("categories", "name:asc"),
            ("warehouses", "code:asc"),
            ("providers", "name:asc"),
            ("movements", "created_at:desc"),
        ] {
            tables.insert(
                resource.to_string(),
                TableConfig {
                    default_sort: Some(sort.to_string()),
                    page_size: None,
                },
            );
        }

        Self {
            pagination: PaginationConfig::default(),
            tables,
            log_filter: Some("stockroom=info".to_string()),
        }
    }
}

/// Install a `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Returns `false` when a global
/// subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
